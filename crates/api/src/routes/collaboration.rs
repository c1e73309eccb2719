use axum::routing::{get, post};
use axum::Router;

use crate::handlers::collaboration;
use crate::state::AppState;

/// Mount collaboration routes (nested under `/collaboration`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/join", post(collaboration::join))
        .route("/leave", post(collaboration::leave))
        .route("/position", post(collaboration::update_position))
        .route("/users", get(collaboration::list_users))
}
