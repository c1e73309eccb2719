//! Handlers for the proposal voting endpoints.
//!
//! The in-memory board is the source of truth for pending proposals and
//! recent history; Postgres is a durable mirror for approved components.
//! When the mirror write fails the approval still stands -- the response
//! carries `persisted: false` so clients can surface the degradation.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use mechacrew_core::types::Timestamp;
use mechacrew_core::voting::{
    HistoryEntry, Proposal, VoteChoice, VoteOutcome, VoteTally, VotingError,
};
use mechacrew_db::models::component::CreateComponent;
use mechacrew_db::repositories::ComponentRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response DTOs
// ---------------------------------------------------------------------------

/// Body for `POST /voting/votes`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitVoteRequest {
    #[serde(default)]
    pub component_id: String,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub user_id: String,
    pub vote: Option<String>,
    /// Opaque component payload, stored verbatim with the proposal.
    #[serde(default)]
    pub component_data: Value,
}

/// Query parameters for `GET /voting/state`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingStateParams {
    pub session_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PendingVoteResponse {
    success: bool,
    status: &'static str,
    component: Proposal,
    votes: VoteTally,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DecidedVoteResponse {
    success: bool,
    status: &'static str,
    component: HistoryEntry,
    message: &'static str,
    /// Present on approvals only: whether the durable mirror write landed.
    #[serde(skip_serializing_if = "Option::is_none")]
    persisted: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VotingStateResponse {
    success: bool,
    pending_votes: Vec<Proposal>,
    history: Vec<HistoryEntry>,
    user_cooldown: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /voting/votes
///
/// Cast a vote on a component proposal. The first vote on an unknown
/// `componentId` creates the proposal.
pub async fn submit_vote(
    State(state): State<AppState>,
    Json(input): Json<SubmitVoteRequest>,
) -> AppResult<Response> {
    let vote = input.vote.as_deref().ok_or(VotingError::Validation("vote"))?;
    let choice = VoteChoice::parse(vote).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Invalid vote '{vote}': must be 'approve' or 'reject'"
        ))
    })?;

    let now = Utc::now();
    let outcome = state
        .voting
        .submit_vote(
            &input.component_id,
            &input.session_id,
            &input.user_id,
            choice,
            input.component_data,
            now,
        )
        .await?;

    match outcome {
        VoteOutcome::Pending { proposal, tally } => {
            tracing::info!(
                component_id = %proposal.id,
                session_id = %proposal.session_id,
                user_id = %input.user_id,
                total = tally.total,
                approve = tally.approve,
                reject = tally.reject,
                "Vote recorded, proposal still pending"
            );
            Ok(Json(PendingVoteResponse {
                success: true,
                status: "pending",
                component: proposal,
                votes: tally,
            })
            .into_response())
        }
        VoteOutcome::Approved { entry } => {
            let persisted = persist_approved(&state, &entry).await;
            tracing::info!(
                component_id = %entry.id,
                session_id = %entry.session_id,
                approved_by = ?entry.approved_by,
                persisted,
                "Proposal approved by majority vote"
            );
            Ok(Json(DecidedVoteResponse {
                success: true,
                status: "approved",
                component: entry,
                message: "Component approved by majority vote!",
                persisted: Some(persisted),
            })
            .into_response())
        }
        VoteOutcome::Rejected { entry } => {
            tracing::info!(
                component_id = %entry.id,
                session_id = %entry.session_id,
                creator_id = %entry.creator_id,
                "Proposal rejected by majority vote"
            );
            Ok(Json(DecidedVoteResponse {
                success: true,
                status: "rejected",
                component: entry,
                message: "Component rejected by majority vote",
                persisted: None,
            })
            .into_response())
        }
    }
}

/// GET /voting/state?sessionId=&userId=
///
/// Current pending proposals, recent decision history, and (when
/// `userId` is supplied) the caller's rejection cooldown.
pub async fn get_voting_state(
    State(state): State<AppState>,
    Query(params): Query<VotingStateParams>,
) -> AppResult<impl IntoResponse> {
    let session_id = params
        .session_id
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(VotingError::Validation("sessionId"))?;

    let snapshot = state
        .voting
        .snapshot(session_id, params.user_id.as_deref(), Utc::now())
        .await;

    Ok(Json(VotingStateResponse {
        success: true,
        pending_votes: snapshot.pending,
        history: snapshot.history,
        user_cooldown: snapshot.user_cooldown,
    }))
}

// ---------------------------------------------------------------------------
// Durable mirror
// ---------------------------------------------------------------------------

/// Mirror an approved proposal into `mecha_components`. Best-effort: a
/// missing pool or a failed insert downgrades to `persisted: false`.
async fn persist_approved(state: &AppState, entry: &HistoryEntry) -> bool {
    let Some(pool) = &state.pool else {
        tracing::debug!(component_id = %entry.id, "No database configured, approval not mirrored");
        return false;
    };

    match ComponentRepo::create(pool, &component_row(entry)).await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(
                component_id = %entry.id,
                error = %e,
                "Failed to mirror approved component"
            );
            false
        }
    }
}

/// Build the component row from the proposal's opaque payload. Fields the
/// payload omits fall back to neutral values rather than failing the
/// approval.
fn component_row(entry: &HistoryEntry) -> CreateComponent {
    let data = &entry.component_data;
    let text = |key: &str, default: &str| -> String {
        data.get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    };
    let stat = |key: &str, default: f64| -> f64 {
        data.get(key).and_then(Value::as_f64).unwrap_or(default)
    };
    let triple = |key: &str, default: [f64; 3]| -> Value {
        data.get(key)
            .cloned()
            .unwrap_or_else(|| serde_json::json!(default))
    };

    CreateComponent {
        id: entry.id.clone(),
        session_id: entry.session_id.clone(),
        component_type: text("type", "accessory"),
        name: text("name", "Approved Component"),
        description: text("description", ""),
        position: triple("position", [0.0, 0.0, 0.0]),
        rotation: triple("rotation", [0.0, 0.0, 0.0]),
        scale: triple("scale", [1.0, 1.0, 1.0]),
        color: text("color", mechacrew_core::component::DEFAULT_COLOR),
        material: text("material", "steel"),
        power: stat("power", 50.0),
        durability: stat("durability", 50.0),
        weight: stat("weight", 50.0),
        created_by: entry.creator_id.clone(),
        metadata: serde_json::json!({
            "approvedAt": entry.approved_at,
            "approvedBy": entry.approved_by,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mechacrew_core::voting::ProposalStatus;

    fn entry_with_payload(data: Value) -> HistoryEntry {
        HistoryEntry {
            id: "c1".into(),
            session_id: "s1".into(),
            component_data: data,
            creator_id: "alice".into(),
            created_at: Utc::now(),
            votes: vec![],
            status: ProposalStatus::Approved,
            approved_at: Some(Utc::now()),
            approved_by: vec!["alice".into(), "bob".into()],
        }
    }

    #[test]
    fn test_component_row_extracts_payload_fields() {
        let row = component_row(&entry_with_payload(serde_json::json!({
            "type": "weapon",
            "name": "Rail Cannon",
            "power": 180,
            "position": [2, 1, 0],
        })));
        assert_eq!(row.component_type, "weapon");
        assert_eq!(row.name, "Rail Cannon");
        assert_eq!(row.power, 180.0);
        assert_eq!(row.position, serde_json::json!([2, 1, 0]));
        assert_eq!(row.created_by, "alice");
    }

    #[test]
    fn test_component_row_defaults_for_sparse_payload() {
        let row = component_row(&entry_with_payload(serde_json::json!({})));
        assert_eq!(row.component_type, "accessory");
        assert_eq!(row.material, "steel");
        assert_eq!(row.power, 50.0);
        assert_eq!(row.scale, serde_json::json!([1.0, 1.0, 1.0]));
        assert_eq!(row.metadata["approvedBy"], serde_json::json!(["alice", "bob"]));
    }
}
