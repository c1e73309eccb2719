//! Repository for the `mecha_components` table.

use sqlx::PgPool;

use crate::models::component::{CreateComponent, MechaComponent};

/// Column list for `mecha_components` queries.
const COMPONENT_COLUMNS: &str = "id, session_id, type, name, description, \
                                  position, rotation, scale, color, material, \
                                  power, durability, weight, created_by, \
                                  created_at, metadata";

/// Provides persistence for approved components.
pub struct ComponentRepo;

impl ComponentRepo {
    /// Insert an approved component and return the stored row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateComponent,
    ) -> Result<MechaComponent, sqlx::Error> {
        let query = format!(
            "INSERT INTO mecha_components ( \
               id, session_id, type, name, description, position, rotation, \
               scale, color, material, power, durability, weight, created_by, metadata) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING {COMPONENT_COLUMNS}"
        );
        sqlx::query_as::<_, MechaComponent>(&query)
            .bind(&input.id)
            .bind(&input.session_id)
            .bind(&input.component_type)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.position)
            .bind(&input.rotation)
            .bind(&input.scale)
            .bind(&input.color)
            .bind(&input.material)
            .bind(input.power)
            .bind(input.durability)
            .bind(input.weight)
            .bind(&input.created_by)
            .bind(&input.metadata)
            .fetch_one(pool)
            .await
    }

    /// List a session's approved components in approval order.
    pub async fn list_by_session(
        pool: &PgPool,
        session_id: &str,
    ) -> Result<Vec<MechaComponent>, sqlx::Error> {
        let query = format!(
            "SELECT {COMPONENT_COLUMNS} FROM mecha_components \
             WHERE session_id = $1 \
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, MechaComponent>(&query)
            .bind(session_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a component. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM mecha_components WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
