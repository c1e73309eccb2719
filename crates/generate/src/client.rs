//! HTTP client for the x.ai chat-completions API.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use mechacrew_core::component::GeneratedComponent;
use mechacrew_core::types::Timestamp;

use crate::draft::{RawDraft, DEFAULT_REASONING};
use crate::prompt::system_prompt;

/// Default API base URL.
const XAI_API_URL: &str = "https://api.x.ai/v1";

/// Model used for component generation.
const XAI_MODEL: &str = "grok-4-latest";

/// Request timeout. Generation is slow but bounded; the collaborator is
/// outside our control so the timeout is enforced on our side.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// A successfully generated component plus bookkeeping for the receipt.
#[derive(Debug, Clone)]
pub struct Generated {
    pub component: GeneratedComponent,
    pub reasoning: String,
    pub tokens_used: i64,
}

/// Errors from the generation collaborator.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("Generation request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Generation API error: HTTP {status}")]
    Api { status: u16 },

    /// The API answered 200 but returned no assistant content.
    #[error("Generation API returned no content")]
    EmptyResponse,
}

/// Client for one x.ai account.
///
/// Construct once at startup and share via `AppState`; `reqwest::Client`
/// pools connections internally.
pub struct GrokClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GrokClient {
    /// Create a client with the production base URL and model.
    ///
    /// Panics only if the TLS backend cannot initialize, which is a
    /// startup-time configuration problem.
    pub fn new(api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            api_key,
            base_url: XAI_API_URL.to_string(),
            model: XAI_MODEL.to_string(),
        }
    }

    /// Override the base URL (used by tests and proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Generate a component from a natural-language command.
    ///
    /// `existing_count` is the number of components already on the mecha,
    /// fed into the prompt so the model can position new parts sensibly.
    /// Model output that is not valid JSON degrades to the documented
    /// defaults rather than failing; only transport/API problems error.
    pub async fn generate_component(
        &self,
        command: &str,
        existing_count: usize,
        component_id: String,
        now: Timestamp,
    ) -> Result<Generated, GenerateError> {
        let request = ChatRequest {
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt(existing_count),
                },
                ChatMessage {
                    role: "user",
                    content: command.to_string(),
                },
            ],
            model: &self.model,
            stream: false,
            temperature: 0.7,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GenerateError::Api {
                status: response.status().as_u16(),
            });
        }

        let body: ChatResponse = response.json().await?;
        let tokens_used = body
            .usage
            .as_ref()
            .map(|u| u.total_tokens)
            .unwrap_or_default();
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(GenerateError::EmptyResponse)?;

        let draft = RawDraft::parse(&content);
        let reasoning = draft
            .reasoning
            .clone()
            .unwrap_or_else(|| DEFAULT_REASONING.to_string());
        let component = draft.normalize(component_id, command, now);

        tracing::debug!(
            component_name = %component.name,
            component_type = %component.component_type,
            tokens_used,
            "Component generated"
        );

        Ok(Generated {
            component,
            reasoning,
            tokens_used,
        })
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage>,
    model: &'a str,
    stream: bool,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    total_tokens: i64,
}
