pub mod chat;
pub mod collaboration;
pub mod generation;
pub mod health;
pub mod session;
pub mod voting;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /voting/votes                POST   cast a vote (creates proposal on first vote)
/// /voting/state                GET    pending proposals, history, cooldown
///
/// /sessions                    GET, POST
/// /sessions/{id}               GET, PUT, DELETE
///
/// /chat/messages               GET, POST
///
/// /collaboration/join          POST
/// /collaboration/leave         POST
/// /collaboration/position      POST
/// /collaboration/users         GET
///
/// /generate                    POST   AI component generation
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Proposal voting engine.
        .nest("/voting", voting::router())
        // Builder session CRUD.
        .nest("/sessions", session::router())
        // Session chat / activity log.
        .nest("/chat", chat::router())
        // Live presence roster.
        .nest("/collaboration", collaboration::router())
        // AI component generation.
        .merge(generation::router())
}
