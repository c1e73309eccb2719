//! Repository for the `mecha_sessions` table.

use sqlx::PgPool;

use crate::models::session::{CreateSession, MechaSession, UpdateSession};

/// Column list for `mecha_sessions` queries.
const SESSION_COLUMNS: &str = "id, name, description, components, is_public, \
                                created_by, created_at, updated_at";

/// Provides CRUD operations for builder sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session and return the stored row.
    pub async fn create(
        pool: &PgPool,
        id: &str,
        created_by: &str,
        input: &CreateSession,
    ) -> Result<MechaSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO mecha_sessions (id, name, description, components, is_public, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {SESSION_COLUMNS}"
        );
        sqlx::query_as::<_, MechaSession>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.components.clone().unwrap_or_else(|| serde_json::json!([])))
            .bind(input.is_public)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Fetch a session by id, or `None`.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<MechaSession>, sqlx::Error> {
        let query = format!("SELECT {SESSION_COLUMNS} FROM mecha_sessions WHERE id = $1");
        sqlx::query_as::<_, MechaSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List public sessions, most recently updated first.
    pub async fn list_public(pool: &PgPool, limit: i64) -> Result<Vec<MechaSession>, sqlx::Error> {
        let query = format!(
            "SELECT {SESSION_COLUMNS} FROM mecha_sessions \
             WHERE is_public = true \
             ORDER BY updated_at DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, MechaSession>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Partially update a session. Absent fields keep their stored values.
    ///
    /// Returns the updated row, or `None` if the session does not exist.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        input: &UpdateSession,
    ) -> Result<Option<MechaSession>, sqlx::Error> {
        let query = format!(
            "UPDATE mecha_sessions SET \
               name = COALESCE($2, name), \
               description = COALESCE($3, description), \
               components = COALESCE($4, components), \
               is_public = COALESCE($5, is_public), \
               updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {SESSION_COLUMNS}"
        );
        sqlx::query_as::<_, MechaSession>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.components)
            .bind(input.is_public)
            .fetch_optional(pool)
            .await
    }

    /// Replace a session's component list and bump `updated_at`.
    ///
    /// Returns the updated row, or `None` if the session does not exist.
    pub async fn set_components(
        pool: &PgPool,
        id: &str,
        components: &serde_json::Value,
    ) -> Result<Option<MechaSession>, sqlx::Error> {
        let query = format!(
            "UPDATE mecha_sessions SET components = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {SESSION_COLUMNS}"
        );
        sqlx::query_as::<_, MechaSession>(&query)
            .bind(id)
            .bind(components)
            .fetch_optional(pool)
            .await
    }

    /// Delete a session. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM mecha_sessions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
