//! Job dispatcher.
//!
//! Validates a submission, registers the run, and hands the matching
//! strategy to the [`TaskLauncher`]. `submit` returns as soon as the run is
//! launched; the dispatcher keeps no handle to it afterwards.

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use redteam_core::error::CoreError;
use redteam_core::submission::{Category, JobSubmission};
use redteam_core::types::TestId;
use redteam_events::Notifier;

use crate::engine::launcher::{DetachedLauncher, TaskLauncher};
use crate::engine::metrics::MetricSource;
use crate::engine::registry::RunRegistry;
use crate::engine::strategy::{self, ExecutionContext};

/// Acknowledgement of a launched run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accepted {
    pub test_id: TestId,
    pub category: Category,
}

pub struct JobDispatcher {
    ctx: ExecutionContext,
    launcher: Arc<dyn TaskLauncher>,
}

impl JobDispatcher {
    /// Create a dispatcher that launches runs as detached Tokio tasks.
    pub fn new(
        notifier: Arc<dyn Notifier>,
        metrics: Arc<dyn MetricSource>,
        registry: RunRegistry,
        milestone_delay: Duration,
    ) -> Self {
        Self {
            ctx: ExecutionContext {
                notifier,
                metrics,
                registry,
                milestone_delay,
            },
            launcher: Arc::new(DetachedLauncher),
        }
    }

    /// Replace the launcher used for accepted runs.
    pub fn with_launcher(mut self, launcher: Arc<dyn TaskLauncher>) -> Self {
        self.launcher = launcher;
        self
    }

    pub fn registry(&self) -> &RunRegistry {
        &self.ctx.registry
    }

    /// Validate `submission` and launch its run.
    ///
    /// On error nothing is launched, registered, or notified.
    pub fn submit(&self, submission: &JobSubmission) -> Result<Accepted, CoreError> {
        let job = match submission.validate() {
            Ok(job) => job,
            Err(e) => {
                tracing::warn!(
                    test_id = %submission.test_id,
                    category = %submission.category,
                    error = %e,
                    "Test submission rejected",
                );
                return Err(e);
            }
        };

        let accepted = Accepted {
            test_id: job.test_id.clone(),
            category: job.category(),
        };

        let generation = self.ctx.registry.register(&job.test_id);
        self.launcher.launch(
            &accepted.test_id,
            strategy::execute(job, generation, self.ctx.clone()).boxed(),
        );

        tracing::info!(
            test_id = %accepted.test_id,
            category = %accepted.category,
            "Test submission accepted",
        );

        Ok(accepted)
    }
}
