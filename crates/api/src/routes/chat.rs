use axum::routing::get;
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// Mount chat routes (nested under `/chat`).
pub fn router() -> Router<AppState> {
    Router::new().route("/messages", get(chat::get_messages).post(chat::post_message))
}
