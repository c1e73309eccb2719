use axum::routing::get;
use axum::Router;

use crate::handlers::session;
use crate::state::AppState;

/// Mount session routes (nested under `/sessions`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(session::list_sessions).post(session::create_session))
        .route(
            "/{id}",
            get(session::get_session)
                .put(session::update_session)
                .delete(session::delete_session),
        )
}
