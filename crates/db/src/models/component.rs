//! Approved component model and DTOs.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use mechacrew_core::types::Timestamp;

/// A row from the `mecha_components` table.
///
/// Spatial transform columns (position/rotation/scale) are JSONB triples,
/// opaque to everything except the frontend renderer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MechaComponent {
    pub id: String,
    pub session_id: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub component_type: String,
    pub name: String,
    pub description: String,
    pub position: Value,
    pub rotation: Value,
    pub scale: Value,
    pub color: String,
    pub material: String,
    pub power: f64,
    pub durability: f64,
    pub weight: f64,
    pub created_by: String,
    pub created_at: Timestamp,
    pub metadata: Value,
}

/// DTO for persisting an approved component.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateComponent {
    pub id: String,
    pub session_id: String,
    pub component_type: String,
    pub name: String,
    pub description: String,
    pub position: Value,
    pub rotation: Value,
    pub scale: Value,
    pub color: String,
    pub material: String,
    pub power: f64,
    pub durability: f64,
    pub weight: f64,
    pub created_by: String,
    pub metadata: Value,
}
