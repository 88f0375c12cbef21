//! Periodic cleanup of finished run snapshots.
//!
//! Removes terminal entries from the [`RunRegistry`] once they are older
//! than the configured retention period, so the status endpoint does not
//! grow without bound. Runs on a fixed interval using
//! `tokio::time::interval`.

use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::engine::RunRegistry;

/// How often the sweep runs.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Run the retention loop until `cancel` is triggered.
pub async fn run(registry: RunRegistry, retention: Duration, cancel: CancellationToken) {
    run_every(registry, retention, SWEEP_INTERVAL, cancel).await;
}

async fn run_every(
    registry: RunRegistry,
    retention: Duration,
    interval: Duration,
    cancel: CancellationToken,
) {
    let retention_chrono = match chrono::Duration::from_std(retention) {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(error = %e, "Run retention period out of range, sweeper disabled");
            return;
        }
    };

    tracing::info!(
        retention_secs = retention.as_secs(),
        interval_secs = interval.as_secs(),
        "Run retention job started"
    );

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Run retention job stopping");
                break;
            }
            _ = ticker.tick() => {
                let cutoff = Utc::now() - retention_chrono;
                let removed = registry.prune_finished_before(cutoff);
                if removed > 0 {
                    tracing::info!(removed, "Run retention: purged finished runs");
                } else {
                    tracing::debug!("Run retention: nothing to purge");
                }
            }
        }
    }
}
