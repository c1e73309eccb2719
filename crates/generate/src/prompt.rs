//! Prompt construction for the mecha-designer model.

/// Build the system prompt describing the JSON shape the model must
/// return. `existing_count` lets the model position new parts relative
/// to what is already on the mecha.
pub fn system_prompt(existing_count: usize) -> String {
    format!(
        r##"You are an AI mecha designer for MechaCrew, a collaborative 3D mecha builder.
Generate realistic mecha components based on natural language commands.

Current mecha has {existing_count} components.

Return a JSON object with the following structure:
{{
  "name": "Component Name",
  "description": "Detailed description",
  "type": "head|torso|arm|leg|weapon|accessory",
  "position": [x, y, z],
  "rotation": [x, y, z],
  "scale": [x, y, z],
  "color": "#hexcolor",
  "material": "steel|titanium|energy|ceramic|composite",
  "power": number (0-200),
  "durability": number (0-100),
  "weight": number (0-100),
  "reasoning": "Why this component fits the command"
}}

Make components realistic and balanced. Consider existing components for positioning."##
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_existing_count() {
        let prompt = system_prompt(7);
        assert!(prompt.contains("has 7 components"));
    }

    #[test]
    fn test_prompt_lists_component_types() {
        let prompt = system_prompt(0);
        assert!(prompt.contains("head|torso|arm|leg|weapon|accessory"));
        assert!(prompt.contains("steel|titanium|energy|ceramic|composite"));
    }
}
