//! Latest known status of each run, for the status query endpoint.
//!
//! The registry stores snapshots only. It never holds a handle to an
//! execution unit, so it cannot await or cancel a run; runs write to it
//! through [`JobRun`](crate::engine::progress::JobRun) as they notify.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use redteam_core::results::ResultPayload;
use redteam_core::status::{StatusNotification, TestStatus};
use redteam_core::types::{Progress, TestId, PROGRESS_COMPLETE};
use serde::Serialize;

/// Point-in-time view of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSnapshot {
    pub status: TestStatus,
    pub progress: Progress,
    pub results: Option<ResultPayload>,
    pub error: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl RunSnapshot {
    fn pending() -> Self {
        Self {
            status: TestStatus::Pending,
            progress: 0,
            results: None,
            error: None,
            updated_at: Utc::now(),
        }
    }
}

/// Identifies one registration of a `testId`.
///
/// Every call to [`RunRegistry::register`] hands out a larger generation, so
/// a run that was superseded by a resubmission can no longer overwrite the
/// snapshot of the run that replaced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

struct Tracked {
    generation: Generation,
    snapshot: RunSnapshot,
}

#[derive(Default)]
struct Runs {
    next_generation: u64,
    entries: HashMap<TestId, Tracked>,
}

/// Shared, cheaply cloneable map of `testId` to [`RunSnapshot`].
#[derive(Clone, Default)]
pub struct RunRegistry {
    runs: Arc<RwLock<Runs>>,
}

impl RunRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a freshly launched run as `pending`, replacing any earlier
    /// snapshot under the same id.
    ///
    /// The returned generation must accompany every [`record`](Self::record)
    /// made on behalf of this run.
    pub fn register(&self, test_id: &str) -> Generation {
        let mut runs = self.runs.write().unwrap_or_else(PoisonError::into_inner);
        runs.next_generation += 1;
        let generation = Generation(runs.next_generation);
        runs.entries.insert(
            test_id.to_string(),
            Tracked {
                generation,
                snapshot: RunSnapshot::pending(),
            },
        );
        generation
    }

    /// Fold a notification into the run's snapshot.
    ///
    /// Returns `false` and leaves the snapshot untouched when `generation`
    /// belongs to a run that has since been replaced.
    pub fn record(&self, generation: Generation, notification: &StatusNotification) -> bool {
        let mut runs = self.runs.write().unwrap_or_else(PoisonError::into_inner);
        let tracked = runs
            .entries
            .entry(notification.test_id.clone())
            .or_insert_with(|| Tracked {
                generation,
                snapshot: RunSnapshot::pending(),
            });

        if tracked.generation != generation {
            return false;
        }

        let snapshot = &mut tracked.snapshot;
        snapshot.status = notification.status;
        snapshot.updated_at = Utc::now();
        match notification.status {
            TestStatus::Pending => {}
            TestStatus::Running => {
                if let Some(progress) = notification.progress() {
                    snapshot.progress = progress;
                }
                snapshot.results = None;
                snapshot.error = None;
            }
            TestStatus::Completed => {
                snapshot.progress = PROGRESS_COMPLETE;
                snapshot.results = notification.payload().cloned();
                snapshot.error = None;
            }
            TestStatus::Failed => {
                snapshot.results = None;
                snapshot.error = notification.error.clone();
            }
        }
        true
    }

    pub fn get(&self, test_id: &str) -> Option<RunSnapshot> {
        self.runs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .get(test_id)
            .map(|t| t.snapshot.clone())
    }

    /// Number of tracked runs that have not reached a terminal state.
    pub fn active_count(&self) -> usize {
        self.runs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .values()
            .filter(|t| !t.snapshot.status.is_terminal())
            .count()
    }

    /// Drop terminal snapshots last updated before `cutoff`.
    ///
    /// Returns the number of snapshots removed. Active runs are never pruned.
    pub fn prune_finished_before(&self, cutoff: DateTime<Utc>) -> usize {
        let mut runs = self.runs.write().unwrap_or_else(PoisonError::into_inner);
        let before = runs.entries.len();
        runs.entries.retain(|_, t| {
            !(t.snapshot.status.is_terminal() && t.snapshot.updated_at < cutoff)
        });
        before - runs.entries.len()
    }
}
