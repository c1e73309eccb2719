use serde_json::Value;
use tokio::sync::RwLock;

use mechacrew_core::types::Timestamp;
use mechacrew_core::voting::{VoteChoice, VoteOutcome, VotingBoard, VotingError, VotingSnapshot};

/// Concurrency wrapper around [`VotingBoard`].
///
/// All writes go through a single `RwLock` write guard, so the
/// read-tally-decide-transition sequence inside `submit_vote` is atomic
/// with respect to concurrent requests: two simultaneous deciding votes
/// cannot both finalize the same proposal.
pub struct VotingStore {
    board: RwLock<VotingBoard>,
}

impl VotingStore {
    pub fn new() -> Self {
        Self {
            board: RwLock::new(VotingBoard::new()),
        }
    }

    /// Cast a vote, creating the proposal if this is its first vote.
    pub async fn submit_vote(
        &self,
        component_id: &str,
        session_id: &str,
        user_id: &str,
        choice: VoteChoice,
        component_data: Value,
        now: Timestamp,
    ) -> Result<VoteOutcome, VotingError> {
        let mut board = self.board.write().await;
        board.submit_vote(component_id, session_id, user_id, choice, component_data, now)
    }

    /// Read-only view of a session's pending proposals, recent history,
    /// and the caller's cooldown.
    pub async fn snapshot(
        &self,
        session_id: &str,
        user_id: Option<&str>,
        now: Timestamp,
    ) -> VotingSnapshot {
        let board = self.board.read().await;
        board.snapshot(session_id, user_id, now)
    }
}

impl Default for VotingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[tokio::test]
    async fn test_concurrent_deciding_votes_finalize_once() {
        let store = std::sync::Arc::new(VotingStore::new());
        let now = chrono::Utc::now();

        store
            .submit_vote("comp-1", "s1", "alice", VoteChoice::Approve, json!({}), now)
            .await
            .unwrap();

        // Two more approvals race; exactly one of them observes the
        // transition to approved, the other finds a fresh proposal.
        let a = {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .submit_vote("comp-1", "s1", "bob", VoteChoice::Approve, json!({}), now)
                    .await
            })
        };
        let b = {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .submit_vote("comp-1", "s1", "carol", VoteChoice::Approve, json!({}), now)
                    .await
            })
        };

        let outcomes = [a.await.unwrap().unwrap(), b.await.unwrap().unwrap()];
        let approved = outcomes
            .iter()
            .filter(|o| matches!(o, VoteOutcome::Approved { .. }))
            .count();
        assert_eq!(approved, 1);

        let snap = store.snapshot("s1", None, now).await;
        assert_eq!(snap.history.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_vote_through_store() {
        let store = VotingStore::new();
        let now = chrono::Utc::now();

        store
            .submit_vote("comp-2", "s1", "alice", VoteChoice::Approve, json!({}), now)
            .await
            .unwrap();
        let err = store
            .submit_vote("comp-2", "s1", "alice", VoteChoice::Reject, json!({}), now)
            .await
            .unwrap_err();
        assert_matches!(err, VotingError::DuplicateVote { .. });
    }
}
