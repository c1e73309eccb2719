//! Repository for the `ai_generations` table.

use sqlx::PgPool;

use crate::models::generation::{AiGeneration, CreateGeneration};

/// Column list for `ai_generations` queries.
const GENERATION_COLUMNS: &str =
    "id, session_id, user_id, prompt, response, component_id, tokens_used, created_at";

/// Records receipts for calls to the generation collaborator.
pub struct GenerationRepo;

impl GenerationRepo {
    /// Record a generation receipt and return the stored row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGeneration,
    ) -> Result<AiGeneration, sqlx::Error> {
        let query = format!(
            "INSERT INTO ai_generations \
               (id, session_id, user_id, prompt, response, component_id, tokens_used) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {GENERATION_COLUMNS}"
        );
        sqlx::query_as::<_, AiGeneration>(&query)
            .bind(&input.id)
            .bind(&input.session_id)
            .bind(&input.user_id)
            .bind(&input.prompt)
            .bind(&input.response)
            .bind(&input.component_id)
            .bind(input.tokens_used)
            .fetch_one(pool)
            .await
    }

    /// List a session's generation receipts, most recent first.
    pub async fn list_by_session(
        pool: &PgPool,
        session_id: &str,
    ) -> Result<Vec<AiGeneration>, sqlx::Error> {
        let query = format!(
            "SELECT {GENERATION_COLUMNS} FROM ai_generations \
             WHERE session_id = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, AiGeneration>(&query)
            .bind(session_id)
            .fetch_all(pool)
            .await
    }
}
