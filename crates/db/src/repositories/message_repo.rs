//! Repository for the `collaboration_messages` table.
//!
//! The backlog is append-only; reads return the most recent `limit`
//! messages in chronological order (clients render oldest first).

use sqlx::PgPool;

use crate::models::message::{CollaborationMessage, CreateMessage};

/// Column list for `collaboration_messages` queries.
const MESSAGE_COLUMNS: &str =
    "id, session_id, user_id, user_name, message, message_type, created_at";

/// Provides the append-only chat/activity log.
pub struct MessageRepo;

impl MessageRepo {
    /// Append a message and return the stored row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMessage,
    ) -> Result<CollaborationMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO collaboration_messages \
               (id, session_id, user_id, user_name, message, message_type) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {MESSAGE_COLUMNS}"
        );
        sqlx::query_as::<_, CollaborationMessage>(&query)
            .bind(&input.id)
            .bind(&input.session_id)
            .bind(&input.user_id)
            .bind(&input.user_name)
            .bind(&input.message)
            .bind(&input.message_type)
            .fetch_one(pool)
            .await
    }

    /// Fetch the most recent `limit` messages for a session, oldest first.
    pub async fn list_recent(
        pool: &PgPool,
        session_id: &str,
        limit: i64,
    ) -> Result<Vec<CollaborationMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {MESSAGE_COLUMNS} FROM collaboration_messages \
             WHERE session_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2"
        );
        let mut messages = sqlx::query_as::<_, CollaborationMessage>(&query)
            .bind(session_id)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        messages.reverse();
        Ok(messages)
    }
}
