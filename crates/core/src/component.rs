//! Mecha component vocabulary, generated-component shape, and fallbacks.
//!
//! The voting engine treats component payloads as opaque JSON; the types
//! here exist for the generation collaborator and the session component
//! list, where the shape *is* known.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

/// Known component slots on a mecha.
pub mod component_types {
    pub const HEAD: &str = "head";
    pub const TORSO: &str = "torso";
    pub const ARM: &str = "arm";
    pub const LEG: &str = "leg";
    pub const WEAPON: &str = "weapon";
    pub const ACCESSORY: &str = "accessory";
}

/// The set of all valid component types.
pub const VALID_COMPONENT_TYPES: &[&str] = &[
    component_types::HEAD,
    component_types::TORSO,
    component_types::ARM,
    component_types::LEG,
    component_types::WEAPON,
    component_types::ACCESSORY,
];

/// The set of all valid material names.
pub const VALID_MATERIALS: &[&str] = &["steel", "titanium", "energy", "ceramic", "composite"];

/// Returns `true` if the given component type is valid.
pub fn is_valid_component_type(component_type: &str) -> bool {
    VALID_COMPONENT_TYPES.contains(&component_type)
}

/// Returns `true` if the given material is valid.
pub fn is_valid_material(material: &str) -> bool {
    VALID_MATERIALS.contains(&material)
}

// ---------------------------------------------------------------------------
// Stat ranges and defaults
// ---------------------------------------------------------------------------

/// Upper bound for the `power` stat.
pub const MAX_POWER: f64 = 200.0;

/// Upper bound for the `durability` stat.
pub const MAX_DURABILITY: f64 = 100.0;

/// Upper bound for the `weight` stat.
pub const MAX_WEIGHT: f64 = 100.0;

/// Default visual color applied when the generator omits one.
pub const DEFAULT_COLOR: &str = "#08B0D5";

/// Color of the emergency fallback component.
pub const FALLBACK_COLOR: &str = "#E6322B";

// ---------------------------------------------------------------------------
// GeneratedComponent
// ---------------------------------------------------------------------------

/// A fully-normalized component produced by the generation collaborator
/// (or its fallback path).
///
/// Spatial attributes are opaque to the voting engine and are passed
/// through to the frontend unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedComponent {
    pub id: String,
    #[serde(rename = "type")]
    pub component_type: String,
    pub name: String,
    pub description: String,
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
    pub color: String,
    pub material: String,
    pub power: f64,
    pub durability: f64,
    pub weight: f64,
    pub created_by: String,
    pub created_at: Timestamp,
}

impl GeneratedComponent {
    /// Build the emergency fallback component returned when the generation
    /// collaborator is unconfigured or fails. The command is echoed in the
    /// description so the user can see what the fallback stands in for.
    pub fn fallback(id: String, command: &str, now: Timestamp) -> Self {
        Self {
            id,
            component_type: component_types::WEAPON.to_string(),
            name: "Emergency Component".to_string(),
            description: format!("Fallback component generated from: \"{command}\""),
            position: [2.0, 1.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: [0.8, 0.8, 2.0],
            color: FALLBACK_COLOR.to_string(),
            material: "steel".to_string(),
            power: 80.0,
            durability: 70.0,
            weight: 30.0,
            created_by: "ai".to_string(),
            created_at: now,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
