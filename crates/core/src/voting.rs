//! Proposal voting engine.
//!
//! A component proposal collects votes from session participants and is
//! decided by simple majority once a quorum of [`VOTE_QUORUM`] votes is
//! reached. Approved proposals move into the session's component history;
//! rejected proposals put their proposer on a cooldown window.
//!
//! [`VotingBoard`] is deliberately synchronous and free of I/O: callers
//! supply `now` and wrap the board in whatever synchronization the
//! serving layer needs. This keeps every transition unit-testable.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum number of votes before an outcome can be decided.
pub const VOTE_QUORUM: usize = 2;

/// Cooldown window applied to a proposer after a rejection, measured from
/// the rejected proposal's creation time.
pub const REJECTION_COOLDOWN_SECS: i64 = 300;

/// How many history entries a voting-state read returns at most.
pub const HISTORY_WINDOW: usize = 20;

// ---------------------------------------------------------------------------
// Vote and proposal types
// ---------------------------------------------------------------------------

/// A voter's choice on a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    Approve,
    Reject,
}

impl VoteChoice {
    /// Parse the wire representation (`"approve"` / `"reject"`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "approve" => Some(Self::Approve),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

/// Lifecycle state of a proposal.
///
/// `Approved` and `Rejected` are terminal; a proposal in a terminal state
/// is absent from the active set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    Pending,
    Approved,
    Rejected,
}

/// A single recorded vote. Owned exclusively by its proposal; at most one
/// vote per voter per proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    #[serde(rename = "userId")]
    pub voter_id: String,
    #[serde(rename = "vote")]
    pub choice: VoteChoice,
    #[serde(rename = "timestamp")]
    pub cast_at: Timestamp,
}

/// A candidate component awaiting approval.
///
/// `component_data` is an opaque payload; the engine never interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: String,
    pub session_id: String,
    pub component_data: Value,
    pub creator_id: String,
    pub created_at: Timestamp,
    pub votes: Vec<Vote>,
    pub status: ProposalStatus,
}

/// A terminal proposal retained for the session's audit trail.
///
/// Created exactly once, at the moment a proposal reaches a terminal
/// state, and never mutated afterward. `approved_at`/`approved_by` are
/// populated only for approvals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub session_id: String,
    pub component_data: Value,
    pub creator_id: String,
    pub created_at: Timestamp,
    pub votes: Vec<Vote>,
    pub status: ProposalStatus,
    pub approved_at: Option<Timestamp>,
    pub approved_by: Vec<String>,
}

// ---------------------------------------------------------------------------
// Tallies and outcomes
// ---------------------------------------------------------------------------

/// Vote counts for a pending proposal, plus the progress hint sent to
/// clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub total: usize,
    pub approve: usize,
    pub reject: usize,
    /// `max(2, ceil(total/2) + 1)` -- a hint for how many votes the next
    /// evaluation wants, not a hard threshold. The decision rule fires as
    /// soon as `total >= VOTE_QUORUM` with a strict majority.
    pub needed: usize,
}

/// Result of an accepted vote submission.
#[derive(Debug, Clone, PartialEq)]
pub enum VoteOutcome {
    /// No decision yet (below quorum, or a tie). Carries the proposal as
    /// it stands and the current tallies.
    Pending {
        proposal: Proposal,
        tally: VoteTally,
    },
    /// Strict approve majority at or above quorum. The proposal has been
    /// moved into session history.
    Approved { entry: HistoryEntry },
    /// Strict reject majority at or above quorum. The proposal has been
    /// removed from the active set and recorded in history so the
    /// proposer's cooldown is derivable.
    Rejected { entry: HistoryEntry },
}

/// Read-only view of a session's voting state.
#[derive(Debug, Clone, PartialEq)]
pub struct VotingSnapshot {
    /// Active (pending) proposals for the session, oldest first.
    pub pending: Vec<Proposal>,
    /// The most recent [`HISTORY_WINDOW`] history entries, oldest first.
    pub history: Vec<HistoryEntry>,
    /// Cooldown expiry for the requesting user, if one is in effect.
    pub user_cooldown: Option<Timestamp>,
}

/// Errors a vote submission can fail with. Neither mutates any state.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum VotingError {
    #[error("Missing required field: {0}")]
    Validation(&'static str),

    #[error("User {voter_id} already voted on this proposal")]
    DuplicateVote { voter_id: String },
}

/// Compute the tally for a vote list.
pub fn tally(votes: &[Vote]) -> VoteTally {
    let total = votes.len();
    let approve = votes
        .iter()
        .filter(|v| v.choice == VoteChoice::Approve)
        .count();
    VoteTally {
        total,
        approve,
        reject: total - approve,
        needed: needed_votes(total),
    }
}

/// Progress hint: `max(2, ceil(total/2) + 1)`.
pub fn needed_votes(total: usize) -> usize {
    VOTE_QUORUM.max(total.div_ceil(2) + 1)
}

// ---------------------------------------------------------------------------
// VotingBoard
// ---------------------------------------------------------------------------

/// Active proposals and per-session history for one deployment.
///
/// Both maps are keyed state shared across all requests; the serving layer
/// must serialize mutations (a single write lock is sufficient -- every
/// critical section here is short and CPU-bound).
#[derive(Debug, Default)]
pub struct VotingBoard {
    /// Active proposals, keyed by component id.
    active: HashMap<String, Proposal>,
    /// Terminal proposals per session, in decision order.
    history: HashMap<String, Vec<HistoryEntry>>,
}

impl VotingBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit one vote, creating the proposal if this is the first vote
    /// for `component_id`.
    ///
    /// The read-tally-decide-transition sequence runs to completion inside
    /// this call, so callers holding a write lock get the atomicity the
    /// outcome rule requires.
    pub fn submit_vote(
        &mut self,
        component_id: &str,
        session_id: &str,
        user_id: &str,
        choice: VoteChoice,
        component_data: Value,
        now: Timestamp,
    ) -> Result<VoteOutcome, VotingError> {
        if component_id.is_empty() {
            return Err(VotingError::Validation("componentId"));
        }
        if session_id.is_empty() {
            return Err(VotingError::Validation("sessionId"));
        }
        if user_id.is_empty() {
            return Err(VotingError::Validation("userId"));
        }

        // First submitter's payload wins; later calls never alter it.
        let proposal = self
            .active
            .entry(component_id.to_string())
            .or_insert_with(|| Proposal {
                id: component_id.to_string(),
                session_id: session_id.to_string(),
                component_data,
                creator_id: user_id.to_string(),
                created_at: now,
                votes: Vec::new(),
                status: ProposalStatus::Pending,
            });

        if proposal.votes.iter().any(|v| v.voter_id == user_id) {
            return Err(VotingError::DuplicateVote {
                voter_id: user_id.to_string(),
            });
        }

        proposal.votes.push(Vote {
            voter_id: user_id.to_string(),
            choice,
            cast_at: now,
        });

        let counts = tally(&proposal.votes);
        if counts.total >= VOTE_QUORUM && counts.approve != counts.reject {
            let status = if counts.approve > counts.reject {
                ProposalStatus::Approved
            } else {
                ProposalStatus::Rejected
            };
            // Safe: the entry was inserted or found above.
            let proposal = self
                .active
                .remove(component_id)
                .expect("proposal present during transition");
            let entry = Self::finalize(proposal, status, now);
            self.history
                .entry(entry.session_id.clone())
                .or_default()
                .push(entry.clone());
            return Ok(match status {
                ProposalStatus::Approved => VoteOutcome::Approved { entry },
                _ => VoteOutcome::Rejected { entry },
            });
        }

        Ok(VoteOutcome::Pending {
            proposal: proposal.clone(),
            tally: counts,
        })
    }

    /// Read-only view of a session: pending proposals, recent history,
    /// and the caller's cooldown expiry (if any). Idempotent.
    pub fn snapshot(
        &self,
        session_id: &str,
        user_id: Option<&str>,
        now: Timestamp,
    ) -> VotingSnapshot {
        let mut pending: Vec<Proposal> = self
            .active
            .values()
            .filter(|p| p.session_id == session_id)
            .cloned()
            .collect();
        pending.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let all = self.history.get(session_id).map(Vec::as_slice).unwrap_or(&[]);
        let window_start = all.len().saturating_sub(HISTORY_WINDOW);
        let history = all[window_start..].to_vec();

        let user_cooldown = user_id.and_then(|uid| cooldown_expiry(all, uid, now));

        VotingSnapshot {
            pending,
            history,
            user_cooldown,
        }
    }

    /// Turn a just-decided proposal into its immutable history entry.
    fn finalize(proposal: Proposal, status: ProposalStatus, now: Timestamp) -> HistoryEntry {
        let approved = status == ProposalStatus::Approved;
        let approved_by = if approved {
            proposal
                .votes
                .iter()
                .filter(|v| v.choice == VoteChoice::Approve)
                .map(|v| v.voter_id.clone())
                .collect()
        } else {
            Vec::new()
        };
        HistoryEntry {
            id: proposal.id,
            session_id: proposal.session_id,
            component_data: proposal.component_data,
            creator_id: proposal.creator_id,
            created_at: proposal.created_at,
            votes: proposal.votes,
            status,
            approved_at: approved.then_some(now),
            approved_by,
        }
    }
}

/// Cooldown is derived, not stored: the expiry is the most recent rejected
/// proposal's `created_at` plus [`REJECTION_COOLDOWN_SECS`], and only
/// reported while still in the future.
pub fn cooldown_expiry(
    history: &[HistoryEntry],
    user_id: &str,
    now: Timestamp,
) -> Option<Timestamp> {
    let last_rejection = history
        .iter()
        .filter(|h| h.creator_id == user_id && h.status == ProposalStatus::Rejected)
        .max_by_key(|h| h.created_at)?;
    let expiry = last_rejection.created_at + chrono::Duration::seconds(REJECTION_COOLDOWN_SECS);
    (now < expiry).then_some(expiry)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
