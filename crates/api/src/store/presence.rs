use std::collections::HashMap;

use serde::Serialize;
use tokio::sync::RwLock;

use mechacrew_core::presence::{DEFAULT_USER_COLOR, PRESENCE_IDLE_TIMEOUT_SECS};
use mechacrew_core::types::Timestamp;

/// A user currently present in the collaboration space.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentUser {
    pub id: String,
    pub name: String,
    pub color: String,
    /// Cursor position in scene coordinates.
    pub position: [f64; 3],
    pub is_active: bool,
    pub last_seen: Timestamp,
}

/// In-memory roster of active collaborators, keyed by user id.
///
/// Joining is idempotent: a re-join refreshes `last_seen` and updates the
/// display name/color. Users who stop sending updates are evicted by the
/// background sweep after [`PRESENCE_IDLE_TIMEOUT_SECS`].
pub struct PresenceRoster {
    users: RwLock<HashMap<String, PresentUser>>,
}

impl PresenceRoster {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Add (or refresh) a user. Returns the stored record.
    pub async fn join(
        &self,
        user_id: &str,
        user_name: &str,
        color: Option<String>,
        now: Timestamp,
    ) -> PresentUser {
        let mut users = self.users.write().await;
        let user = users
            .entry(user_id.to_string())
            .and_modify(|u| {
                u.name = user_name.to_string();
                u.is_active = true;
                u.last_seen = now;
                if let Some(c) = &color {
                    u.color = c.clone();
                }
            })
            .or_insert_with(|| PresentUser {
                id: user_id.to_string(),
                name: user_name.to_string(),
                color: color.unwrap_or_else(|| DEFAULT_USER_COLOR.to_string()),
                position: [0.0, 0.0, 0.0],
                is_active: true,
                last_seen: now,
            });
        user.clone()
    }

    /// Remove a user. Returns the removed record, if any.
    pub async fn leave(&self, user_id: &str) -> Option<PresentUser> {
        self.users.write().await.remove(user_id)
    }

    /// Update a user's cursor position and refresh their liveness.
    /// Returns false when the user is not on the roster.
    pub async fn update_position(
        &self,
        user_id: &str,
        position: [f64; 3],
        now: Timestamp,
    ) -> bool {
        let mut users = self.users.write().await;
        match users.get_mut(user_id) {
            Some(user) => {
                user.position = position;
                user.last_seen = now;
                true
            }
            None => false,
        }
    }

    /// All present users, most recently seen first.
    pub async fn list(&self) -> Vec<PresentUser> {
        let users = self.users.read().await;
        let mut list: Vec<PresentUser> = users.values().cloned().collect();
        list.sort_by(|a, b| b.last_seen.cmp(&a.last_seen).then(a.id.cmp(&b.id)));
        list
    }

    /// Evict users idle longer than the presence timeout. Returns the
    /// number evicted.
    pub async fn sweep(&self, now: Timestamp) -> usize {
        let cutoff = now - chrono::Duration::seconds(PRESENCE_IDLE_TIMEOUT_SECS);
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|_, u| u.last_seen > cutoff);
        before - users.len()
    }
}

impl Default for PresenceRoster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> Timestamp {
        chrono::Utc::now()
    }

    #[tokio::test]
    async fn test_join_assigns_default_color() {
        let roster = PresenceRoster::new();
        let user = roster.join("u1", "Alice", None, t0()).await;
        assert_eq!(user.color, DEFAULT_USER_COLOR);
        assert!(user.is_active);
        assert_eq!(user.position, [0.0, 0.0, 0.0]);
    }

    #[tokio::test]
    async fn test_rejoin_refreshes_without_duplicating() {
        let roster = PresenceRoster::new();
        let now = t0();
        roster.join("u1", "Alice", None, now).await;
        let later = now + chrono::Duration::seconds(10);
        let user = roster
            .join("u1", "Alice B", Some("#112233".into()), later)
            .await;

        assert_eq!(user.name, "Alice B");
        assert_eq!(user.color, "#112233");
        assert_eq!(roster.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_update_position_unknown_user() {
        let roster = PresenceRoster::new();
        assert!(!roster.update_position("ghost", [1.0, 2.0, 3.0], t0()).await);
    }

    #[tokio::test]
    async fn test_update_position_refreshes_last_seen() {
        let roster = PresenceRoster::new();
        let now = t0();
        roster.join("u1", "Alice", None, now).await;
        let later = now + chrono::Duration::seconds(60);
        assert!(roster.update_position("u1", [1.0, 0.0, -2.5], later).await);

        let list = roster.list().await;
        assert_eq!(list[0].position, [1.0, 0.0, -2.5]);
        assert_eq!(list[0].last_seen, later);
    }

    #[tokio::test]
    async fn test_sweep_evicts_only_idle_users() {
        let roster = PresenceRoster::new();
        let now = t0();
        roster.join("stale", "Stale", None, now).await;
        roster
            .join(
                "fresh",
                "Fresh",
                None,
                now + chrono::Duration::seconds(PRESENCE_IDLE_TIMEOUT_SECS),
            )
            .await;

        let sweep_at = now + chrono::Duration::seconds(PRESENCE_IDLE_TIMEOUT_SECS + 1);
        let evicted = roster.sweep(sweep_at).await;
        assert_eq!(evicted, 1);

        let list = roster.list().await;
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, "fresh");
    }

    #[tokio::test]
    async fn test_leave_returns_removed_user() {
        let roster = PresenceRoster::new();
        roster.join("u1", "Alice", None, t0()).await;
        let removed = roster.leave("u1").await;
        assert_eq!(removed.map(|u| u.name), Some("Alice".to_string()));
        assert!(roster.leave("u1").await.is_none());
    }
}
