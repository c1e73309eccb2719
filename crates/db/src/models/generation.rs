//! AI generation receipt model and DTOs.
//!
//! Receipts are an audit trail of calls to the generation collaborator;
//! nothing reads them on the hot path.

use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;

use mechacrew_core::types::Timestamp;

/// A row from the `ai_generations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AiGeneration {
    pub id: String,
    pub session_id: Option<String>,
    pub user_id: Option<String>,
    pub prompt: String,
    pub response: Value,
    pub component_id: String,
    pub tokens_used: i64,
    pub created_at: Timestamp,
}

/// DTO for recording a generation receipt.
#[derive(Debug, Clone)]
pub struct CreateGeneration {
    pub id: String,
    pub session_id: Option<String>,
    pub user_id: Option<String>,
    pub prompt: String,
    pub response: Value,
    pub component_id: String,
    pub tokens_used: i64,
}
