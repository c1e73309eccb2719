//! Handler for AI component generation.
//!
//! Generation is a degraded-success operation: if the collaborator is
//! unconfigured, errors, or times out, the response is still a usable
//! component -- the documented fallback part -- flagged `fallback: true`.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use mechacrew_core::component::GeneratedComponent;
use mechacrew_core::error::CoreError;
use mechacrew_db::models::generation::CreateGeneration;
use mechacrew_db::repositories::GenerationRepo;
use mechacrew_generate::client::Generated;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Reasoning string attached to fallback components.
const FALLBACK_REASONING: &str =
    "Fallback component generated due to AI service unavailability";

/// Body for `POST /generate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub command: String,
    pub session_id: Option<String>,
    pub user_id: Option<String>,
    /// Components already on the mecha, used only for prompt context.
    #[serde(default)]
    pub existing_components: Vec<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    success: bool,
    component: GeneratedComponent,
    reasoning: String,
    fallback: bool,
}

/// POST /generate
pub async fn generate(
    State(state): State<AppState>,
    Json(input): Json<GenerateRequest>,
) -> AppResult<impl IntoResponse> {
    if input.command.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Missing required field: command".to_string(),
        )));
    }

    let now = Utc::now();
    let component_id = format!("ai-component-{}", Uuid::new_v4());

    let generated = match &state.generator {
        Some(generator) => {
            match generator
                .generate_component(
                    &input.command,
                    input.existing_components.len(),
                    component_id,
                    now,
                )
                .await
            {
                Ok(generated) => Some(generated),
                Err(e) => {
                    tracing::warn!(error = %e, "Generation collaborator failed, using fallback");
                    None
                }
            }
        }
        None => {
            tracing::debug!("Generation collaborator not configured, using fallback");
            None
        }
    };

    match generated {
        Some(generated) => {
            record_receipt(&state, &input, &generated).await;
            tracing::info!(
                component_id = %generated.component.id,
                component_type = %generated.component.component_type,
                tokens_used = generated.tokens_used,
                "Component generated"
            );
            Ok(Json(GenerateResponse {
                success: true,
                component: generated.component,
                reasoning: generated.reasoning,
                fallback: false,
            }))
        }
        None => {
            let component = GeneratedComponent::fallback(
                format!("fallback-{}", Uuid::new_v4()),
                &input.command,
                now,
            );
            Ok(Json(GenerateResponse {
                success: true,
                component,
                reasoning: FALLBACK_REASONING.to_string(),
                fallback: true,
            }))
        }
    }
}

/// Record the generation receipt. Best-effort: a missing pool or failed
/// insert only logs a warning.
async fn record_receipt(state: &AppState, input: &GenerateRequest, generated: &Generated) {
    let Some(pool) = &state.pool else {
        return;
    };

    let receipt = CreateGeneration {
        id: format!("gen-{}", Uuid::new_v4()),
        session_id: input.session_id.clone(),
        user_id: input.user_id.clone(),
        prompt: input.command.clone(),
        response: serde_json::to_value(&generated.component).unwrap_or(Value::Null),
        component_id: generated.component.id.clone(),
        tokens_used: generated.tokens_used,
    };

    if let Err(e) = GenerationRepo::create(pool, &receipt).await {
        tracing::warn!(
            component_id = %generated.component.id,
            error = %e,
            "Failed to record generation receipt"
        );
    }
}
