//! Hourly pruning of idle session rows.
//!
//! Abandoned journeys leave their session envelopes behind; this task
//! deletes rows idle past the configured threshold so the table does
//! not grow without bound.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use intake_db::repositories::FormSessionRepo;
use intake_db::DbPool;

/// Interval between pruning passes.
const PRUNE_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Spawn the pruning loop. The returned handle is aborted on shutdown.
pub fn spawn(pool: DbPool, max_idle_days: i32) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PRUNE_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            match FormSessionRepo::delete_idle(&pool, max_idle_days).await {
                Ok(0) => {}
                Ok(deleted) => {
                    tracing::info!(deleted, "Pruned idle form sessions");
                }
                Err(err) => {
                    tracing::error!(error = %err, "Session pruning failed");
                }
            }
        }
    })
}
