//! Lossy parsing and normalization of model output.
//!
//! The model is asked for a strict JSON object but does not always comply.
//! Parsing is therefore lossy-by-design: unparseable or missing fields
//! collapse to the documented defaults instead of failing the request.

use serde::Deserialize;

use mechacrew_core::component::{GeneratedComponent, DEFAULT_COLOR};
use mechacrew_core::types::Timestamp;

/// Reasoning string used when the model omits one.
pub const DEFAULT_REASONING: &str = "AI generated component based on user command";

/// Raw component draft as the model emits it. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub component_type: Option<String>,
    pub position: Option<[f64; 3]>,
    pub rotation: Option<[f64; 3]>,
    pub scale: Option<[f64; 3]>,
    pub color: Option<String>,
    pub material: Option<String>,
    pub power: Option<f64>,
    pub durability: Option<f64>,
    pub weight: Option<f64>,
    pub reasoning: Option<String>,
}

impl RawDraft {
    /// Parse the assistant message content. Returns a default draft when
    /// the content is not valid JSON.
    pub fn parse(content: &str) -> Self {
        serde_json::from_str(content).unwrap_or_default()
    }

    /// Fill in defaults and attach identity fields, yielding the
    /// component record the rest of the system works with.
    pub fn normalize(self, id: String, command: &str, now: Timestamp) -> GeneratedComponent {
        GeneratedComponent {
            id,
            component_type: self.component_type.unwrap_or_else(|| "weapon".to_string()),
            name: self.name.unwrap_or_else(|| "AI Generated Component".to_string()),
            description: self
                .description
                .unwrap_or_else(|| format!("Generated from: \"{command}\"")),
            position: self.position.unwrap_or([2.0, 1.0, 0.0]),
            rotation: self.rotation.unwrap_or([0.0, 0.0, 0.0]),
            scale: self.scale.unwrap_or([0.8, 0.8, 2.0]),
            color: self.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            material: self.material.unwrap_or_else(|| "energy".to_string()),
            power: self.power.unwrap_or(100.0),
            durability: self.durability.unwrap_or(85.0),
            weight: self.weight.unwrap_or(25.0),
            created_by: "ai".to_string(),
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_json() {
        let draft = RawDraft::parse(r#"{"name": "Rail Cannon", "type": "weapon", "power": 180}"#);
        assert_eq!(draft.name.as_deref(), Some("Rail Cannon"));
        assert_eq!(draft.power, Some(180.0));
    }

    #[test]
    fn test_parse_garbage_yields_default_draft() {
        let draft = RawDraft::parse("Sure! Here's a great component for you:");
        assert!(draft.name.is_none());
        assert!(draft.component_type.is_none());
    }

    #[test]
    fn test_normalize_applies_defaults() {
        let now = chrono::Utc::now();
        let comp = RawDraft::default().normalize("c1".into(), "add lasers", now);
        assert_eq!(comp.component_type, "weapon");
        assert_eq!(comp.material, "energy");
        assert_eq!(comp.color, DEFAULT_COLOR);
        assert_eq!(comp.power, 100.0);
        assert!(comp.description.contains("add lasers"));
        assert_eq!(comp.created_by, "ai");
    }

    #[test]
    fn test_normalize_keeps_model_values() {
        let now = chrono::Utc::now();
        let draft = RawDraft::parse(
            r#"{"name": "Sensor Dome", "type": "head", "material": "ceramic",
                "position": [0, 4, 0], "durability": 95}"#,
        );
        let comp = draft.normalize("c2".into(), "cmd", now);
        assert_eq!(comp.name, "Sensor Dome");
        assert_eq!(comp.component_type, "head");
        assert_eq!(comp.material, "ceramic");
        assert_eq!(comp.position, [0.0, 4.0, 0.0]);
        assert_eq!(comp.durability, 95.0);
        // Unspecified stats still default.
        assert_eq!(comp.power, 100.0);
    }
}
