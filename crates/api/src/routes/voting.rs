use axum::routing::{get, post};
use axum::Router;

use crate::handlers::voting;
use crate::state::AppState;

/// Mount voting routes (nested under `/voting`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/votes", post(voting::submit_vote))
        .route("/state", get(voting::get_voting_state))
}
