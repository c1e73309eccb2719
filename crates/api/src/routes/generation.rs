use axum::routing::post;
use axum::Router;

use crate::handlers::generation;
use crate::state::AppState;

/// Mount the generation route (merged at the API root).
pub fn router() -> Router<AppState> {
    Router::new().route("/generate", post(generation::generate))
}
