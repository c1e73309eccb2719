//! Builder session model and DTOs.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use mechacrew_core::types::Timestamp;

/// A row from the `mecha_sessions` table.
///
/// `components` holds the ordered list of approved components as opaque
/// JSON; the voting engine appends to it, the frontend renders it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MechaSession {
    pub id: String,
    pub name: String,
    pub description: String,
    pub components: Value,
    pub is_public: bool,
    pub created_by: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a session.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSession {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub components: Option<Value>,
    #[serde(default = "default_is_public")]
    pub is_public: bool,
}

fn default_is_public() -> bool {
    true
}

/// DTO for a partial session update. Absent fields keep their values.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSession {
    pub name: Option<String>,
    pub description: Option<String>,
    pub components: Option<Value>,
    pub is_public: Option<bool>,
}
