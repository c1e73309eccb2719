//! Handlers for the live collaboration roster.
//!
//! Presence is in-memory only; join/leave additionally append an action
//! line to the session's activity log when a database is configured.
//! Those appends are best-effort: a failed log write never fails the
//! presence operation itself.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mechacrew_core::chat::message_types;
use mechacrew_core::error::CoreError;
use mechacrew_core::presence::validate_join;
use mechacrew_db::models::message::CreateMessage;
use mechacrew_db::repositories::MessageRepo;

use crate::error::{AppError, AppResult};
use crate::response::Ack;
use crate::state::AppState;
use crate::store::presence::PresentUser;

// ---------------------------------------------------------------------------
// Request / response DTOs
// ---------------------------------------------------------------------------

/// Body for `POST /collaboration/join`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    pub color: Option<String>,
    pub session_id: Option<String>,
}

/// Body for `POST /collaboration/leave`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    #[serde(default)]
    pub user_id: String,
    pub session_id: Option<String>,
}

/// Body for `POST /collaboration/position`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRequest {
    #[serde(default)]
    pub user_id: String,
    pub position: Option<[f64; 3]>,
}

#[derive(Debug, Serialize)]
struct JoinResponse {
    success: bool,
    user: PresentUser,
}

#[derive(Debug, Serialize)]
struct UsersResponse {
    users: Vec<PresentUser>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /collaboration/join
pub async fn join(
    State(state): State<AppState>,
    Json(input): Json<JoinRequest>,
) -> AppResult<impl IntoResponse> {
    validate_join(&input.user_id, &input.user_name)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    let user = state
        .presence
        .join(&input.user_id, &input.user_name, input.color, Utc::now())
        .await;

    tracing::info!(user_id = %user.id, user_name = %user.name, "User joined collaboration");

    log_action(&state, input.session_id.as_deref(), &user.id, &user.name, "joined the session")
        .await;

    Ok(Json(JoinResponse {
        success: true,
        user,
    }))
}

/// POST /collaboration/leave
pub async fn leave(
    State(state): State<AppState>,
    Json(input): Json<LeaveRequest>,
) -> AppResult<impl IntoResponse> {
    if input.user_id.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "userId is required".to_string(),
        )));
    }

    if let Some(user) = state.presence.leave(&input.user_id).await {
        tracing::info!(user_id = %user.id, user_name = %user.name, "User left collaboration");
        log_action(&state, input.session_id.as_deref(), &user.id, &user.name, "left the session")
            .await;
    }

    Ok(Json(Ack::ok()))
}

/// POST /collaboration/position
pub async fn update_position(
    State(state): State<AppState>,
    Json(input): Json<PositionRequest>,
) -> AppResult<impl IntoResponse> {
    if input.user_id.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "userId is required".to_string(),
        )));
    }
    let position = input.position.ok_or_else(|| {
        AppError::Core(CoreError::Validation("position is required".to_string()))
    })?;

    let known = state
        .presence
        .update_position(&input.user_id, position, Utc::now())
        .await;

    if !known {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.user_id,
        }));
    }

    Ok(Json(Ack::ok()))
}

/// GET /collaboration/users
pub async fn list_users(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let users = state.presence.list().await;
    Ok(Json(UsersResponse { users }))
}

// ---------------------------------------------------------------------------
// Activity log
// ---------------------------------------------------------------------------

/// Append a join/leave action line to the session log, when possible.
async fn log_action(
    state: &AppState,
    session_id: Option<&str>,
    user_id: &str,
    user_name: &str,
    what: &str,
) {
    let (Some(pool), Some(session_id)) = (&state.pool, session_id) else {
        return;
    };

    let result = MessageRepo::create(
        pool,
        &CreateMessage {
            id: format!("msg-{}", Uuid::new_v4()),
            session_id: session_id.to_string(),
            user_id: user_id.to_string(),
            user_name: user_name.to_string(),
            message: format!("{user_name} {what}"),
            message_type: message_types::ACTION.to_string(),
        },
    )
    .await;

    if let Err(e) = result {
        tracing::warn!(user_id, session_id, error = %e, "Failed to log presence action");
    }
}
