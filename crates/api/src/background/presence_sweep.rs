//! Periodic eviction of idle collaborators.
//!
//! Spawns a background task that removes users from the presence roster
//! once they have been silent longer than the idle timeout. Runs on a
//! fixed interval using `tokio::time::interval`.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use mechacrew_core::presence::PRESENCE_SWEEP_INTERVAL_SECS;

use crate::store::presence::PresenceRoster;

/// How often the sweep runs.
const SWEEP_INTERVAL: Duration = Duration::from_secs(PRESENCE_SWEEP_INTERVAL_SECS);

/// Run the presence sweep loop until `cancel` is triggered.
pub async fn run(roster: Arc<PresenceRoster>, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = SWEEP_INTERVAL.as_secs(),
        "Presence sweep job started"
    );

    let mut interval = tokio::time::interval(SWEEP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Presence sweep job stopping");
                break;
            }
            _ = interval.tick() => {
                let evicted = roster.sweep(Utc::now()).await;
                if evicted > 0 {
                    tracing::info!(evicted, "Presence sweep: evicted idle users");
                } else {
                    tracing::debug!("Presence sweep: no idle users");
                }
            }
        }
    }
}
