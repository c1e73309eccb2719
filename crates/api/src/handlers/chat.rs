//! Handlers for the session chat / activity log.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mechacrew_core::chat::{is_valid_message_type, validate_message, DEFAULT_MESSAGE_LIMIT};
use mechacrew_core::error::CoreError;
use mechacrew_db::models::message::{CollaborationMessage, CreateMessage};
use mechacrew_db::repositories::MessageRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

const MAX_MESSAGE_LIMIT: i64 = 200;

/// Body for `POST /chat/messages`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMessageRequest {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub message: String,
    pub message_type: Option<String>,
}

/// Query parameters for `GET /chat/messages`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetMessagesParams {
    pub session_id: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    success: bool,
    message: CollaborationMessage,
}

#[derive(Debug, Serialize)]
struct MessageListResponse {
    success: bool,
    messages: Vec<CollaborationMessage>,
}

/// POST /chat/messages
pub async fn post_message(
    State(state): State<AppState>,
    Json(input): Json<PostMessageRequest>,
) -> AppResult<impl IntoResponse> {
    let pool = state.db()?;

    for (value, field) in [
        (&input.session_id, "sessionId"),
        (&input.user_id, "userId"),
        (&input.user_name, "userName"),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Missing required field: {field}"
            ))));
        }
    }
    validate_message(&input.message).map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    let message_type = input
        .message_type
        .unwrap_or_else(|| mechacrew_core::chat::message_types::CHAT.to_string());
    if !is_valid_message_type(&message_type) {
        return Err(AppError::BadRequest(format!(
            "Invalid message type '{message_type}'"
        )));
    }

    let row = MessageRepo::create(
        pool,
        &CreateMessage {
            id: format!("msg-{}", Uuid::new_v4()),
            session_id: input.session_id,
            user_id: input.user_id,
            user_name: input.user_name,
            message: input.message,
            message_type,
        },
    )
    .await?;

    tracing::info!(
        message_id = %row.id,
        session_id = %row.session_id,
        user_id = %row.user_id,
        message_type = %row.message_type,
        "Chat message posted"
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            success: true,
            message: row,
        }),
    ))
}

/// GET /chat/messages?sessionId=&limit=
///
/// The most recent messages for a session, oldest first.
pub async fn get_messages(
    State(state): State<AppState>,
    Query(params): Query<GetMessagesParams>,
) -> AppResult<impl IntoResponse> {
    let pool = state.db()?;
    let session_id = params
        .session_id
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "Missing required field: sessionId".to_string(),
            ))
        })?;

    let limit = params
        .limit
        .unwrap_or(DEFAULT_MESSAGE_LIMIT)
        .clamp(1, MAX_MESSAGE_LIMIT);

    let messages = MessageRepo::list_recent(pool, session_id, limit).await?;
    Ok(Json(MessageListResponse {
        success: true,
        messages,
    }))
}
