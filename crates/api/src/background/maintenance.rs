//! Periodic database housekeeping.
//!
//! One loop handles both recurring chores: deleting expired or revoked
//! refresh-token sessions, and pruning stale view-dedup marks that can no
//! longer suppress anything. Runs on a fixed interval using
//! `tokio::time::interval`.

use std::time::Duration;

use meridian_db::repositories::{EngagementRepo, SessionRepo};
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// How often the housekeeping job runs.
const MAINTENANCE_INTERVAL: Duration = Duration::from_secs(3600); // 1 hour

/// View marks older than this many seconds are safe to prune regardless of
/// the configured dedup window; kept generous so a window raised at runtime
/// still has its history.
const VIEW_MARK_RETENTION_SECS: i64 = 86_400; // 24 hours

/// Run the housekeeping loop until `cancel` is triggered.
pub async fn run(pool: PgPool, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = MAINTENANCE_INTERVAL.as_secs(),
        "Maintenance job started"
    );

    let mut interval = tokio::time::interval(MAINTENANCE_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Maintenance job stopping");
                break;
            }
            _ = interval.tick() => {
                match SessionRepo::purge_stale(&pool).await {
                    Ok(deleted) if deleted > 0 => {
                        tracing::info!(deleted, "Maintenance: purged stale sessions");
                    }
                    Ok(_) => {
                        tracing::debug!("Maintenance: no stale sessions");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Maintenance: session cleanup failed");
                    }
                }

                match EngagementRepo::prune_view_marks(&pool, VIEW_MARK_RETENTION_SECS).await {
                    Ok(deleted) if deleted > 0 => {
                        tracing::info!(deleted, "Maintenance: pruned old view marks");
                    }
                    Ok(_) => {
                        tracing::debug!("Maintenance: no view marks to prune");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Maintenance: view mark pruning failed");
                    }
                }
            }
        }
    }
}
