//! Handlers for builder session CRUD.
//!
//! All session endpoints require the database; without `DATABASE_URL`
//! they answer 503 `COLLABORATOR_UNAVAILABLE`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mechacrew_core::error::CoreError;
use mechacrew_db::models::session::{CreateSession, MechaSession, UpdateSession};
use mechacrew_db::repositories::SessionRepo;

use crate::error::{AppError, AppResult};
use crate::response::Ack;
use crate::state::AppState;

/// Default and maximum number of sessions a listing returns.
const DEFAULT_SESSION_LIMIT: i64 = 50;
const MAX_SESSION_LIMIT: i64 = 200;

/// Creator recorded for sessions made through the anonymous API.
const GUEST_USER: &str = "guest";

#[derive(Debug, Deserialize)]
pub struct ListSessionParams {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
struct SessionResponse {
    success: bool,
    session: MechaSession,
}

#[derive(Debug, Serialize)]
struct SessionListResponse {
    success: bool,
    sessions: Vec<MechaSession>,
}

/// GET /sessions?limit=
///
/// List public sessions, most recently updated first.
pub async fn list_sessions(
    State(state): State<AppState>,
    Query(params): Query<ListSessionParams>,
) -> AppResult<impl IntoResponse> {
    let pool = state.db()?;
    let limit = params
        .limit
        .unwrap_or(DEFAULT_SESSION_LIMIT)
        .clamp(1, MAX_SESSION_LIMIT);

    let sessions = SessionRepo::list_public(pool, limit).await?;
    Ok(Json(SessionListResponse {
        success: true,
        sessions,
    }))
}

/// POST /sessions
///
/// Create a new builder session.
pub async fn create_session(
    State(state): State<AppState>,
    Json(input): Json<CreateSession>,
) -> AppResult<impl IntoResponse> {
    let pool = state.db()?;
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("Session name is required".to_string()));
    }

    let id = format!("session-{}", Uuid::new_v4());
    let session = SessionRepo::create(pool, &id, GUEST_USER, &input).await?;

    tracing::info!(session_id = %session.id, name = %session.name, "Session created");

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            success: true,
            session,
        }),
    ))
}

/// GET /sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let pool = state.db()?;
    let session = SessionRepo::find_by_id(pool, &id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Session",
            id: id.clone(),
        })
    })?;

    Ok(Json(SessionResponse {
        success: true,
        session,
    }))
}

/// PUT /sessions/{id}
///
/// Partial update: absent fields keep their stored values.
pub async fn update_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateSession>,
) -> AppResult<impl IntoResponse> {
    let pool = state.db()?;
    if let Some(name) = &input.name {
        if name.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Session name cannot be empty".to_string(),
            ));
        }
    }

    let session = SessionRepo::update(pool, &id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Session",
                id: id.clone(),
            })
        })?;

    tracing::info!(session_id = %id, "Session updated");

    Ok(Json(SessionResponse {
        success: true,
        session,
    }))
}

/// DELETE /sessions/{id}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let pool = state.db()?;
    let deleted = SessionRepo::delete(pool, &id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Session",
            id: id.clone(),
        }));
    }

    tracing::info!(session_id = %id, "Session deleted");

    Ok(Json(Ack::ok()))
}
