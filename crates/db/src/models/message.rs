//! Chat / activity log message model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use mechacrew_core::types::Timestamp;

/// A row from the `collaboration_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CollaborationMessage {
    pub id: String,
    pub session_id: String,
    pub user_id: String,
    pub user_name: String,
    pub message: String,
    pub message_type: String,
    pub created_at: Timestamp,
}

/// DTO for appending a message to a session's backlog.
#[derive(Debug, Clone)]
pub struct CreateMessage {
    pub id: String,
    pub session_id: String,
    pub user_id: String,
    pub user_name: String,
    pub message: String,
    pub message_type: String,
}
