use std::sync::Arc;

use mechacrew_db::DbPool;
use mechacrew_generate::client::GrokClient;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};
use crate::store::presence::PresenceRoster;
use crate::store::voting::VotingStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
///
/// The database pool and the generation client are optional: the server
/// starts without `DATABASE_URL` or `XAI_API_KEY` and the endpoints that
/// need them degrade instead of crashing (503 for persistence, fallback
/// components for generation).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, when `DATABASE_URL` is configured.
    pub pool: Option<DbPool>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// In-memory voting board shared across requests.
    pub voting: Arc<VotingStore>,
    /// In-memory collaborator presence roster.
    pub presence: Arc<PresenceRoster>,
    /// Generation API client, when `XAI_API_KEY` is configured.
    pub generator: Option<Arc<GrokClient>>,
}

impl AppState {
    /// The database pool, or a 503 `COLLABORATOR_UNAVAILABLE` error for
    /// endpoints that cannot work without one.
    pub fn db(&self) -> AppResult<&DbPool> {
        self.pool
            .as_ref()
            .ok_or(AppError::CollaboratorUnavailable("Database"))
    }
}
