//! Execution strategies, one per test category.
//!
//! Strategy selection is an exhaustive match on [`TestKind`]. Every strategy
//! follows the same protocol: `running(0)`, its own ascending milestones
//! (each after a pause), then one `completed` with the category payload.
//! Any fault, including a panic, ends the run with a single `failed`.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use redteam_core::error::ExecutionFault;
use redteam_core::results::ResultPayload;
use redteam_core::submission::{TestJob, TestKind};
use redteam_core::types::Progress;
use redteam_events::Notifier;
use tracing::Instrument;

use crate::engine::metrics::MetricSource;
use crate::engine::progress::JobRun;
use crate::engine::registry::{Generation, RunRegistry};

/// Progress milestones emitted by white box runs after `running(0)`.
pub const WHITE_BOX_MILESTONES: &[Progress] = &[25, 50, 75, 100];

/// Progress milestones emitted by black box runs after `running(0)`.
pub const BLACK_BOX_MILESTONES: &[Progress] = &[20, 40, 60, 80, 100];

/// Milestones for the strategy matching `kind`.
pub fn milestones(kind: &TestKind) -> &'static [Progress] {
    match kind {
        TestKind::WhiteBox(_) => WHITE_BOX_MILESTONES,
        TestKind::BlackBox(_) => BLACK_BOX_MILESTONES,
    }
}

/// Collaborators a run needs, cloned into every execution unit.
#[derive(Clone)]
pub struct ExecutionContext {
    pub notifier: Arc<dyn Notifier>,
    pub metrics: Arc<dyn MetricSource>,
    pub registry: RunRegistry,
    pub milestone_delay: Duration,
}

/// Execute `job` to its terminal notification.
///
/// `generation` is the registration handed out for this run. Never returns
/// an error and never panics outward: every outcome is communicated
/// through the notifier.
pub async fn execute(job: TestJob, generation: Generation, ctx: ExecutionContext) {
    let span = tracing::info_span!(
        "test_run",
        test_id = %job.test_id,
        category = %job.category(),
        max_samples = job.options.max_samples,
        defense = job.options.defense.as_deref().unwrap_or("none"),
    );

    async move {
        let mut run = JobRun::new(
            job.test_id.clone(),
            generation,
            Arc::clone(&ctx.notifier),
            ctx.registry.clone(),
        );

        let outcome = AssertUnwindSafe(drive(&mut run, &job, &ctx))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(())) => {
                tracing::info!("Test run completed");
            }
            Ok(Err(fault)) => {
                tracing::warn!(error = %fault, "Test run failed");
                run.fail(&fault.message).await;
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                tracing::error!(error = %message, "Test run panicked");
                run.fail(&message).await;
            }
        }
    }
    .instrument(span)
    .await
}

/// The protocol shared by every strategy.
async fn drive(
    run: &mut JobRun,
    job: &TestJob,
    ctx: &ExecutionContext,
) -> Result<(), ExecutionFault> {
    run.advance(0).await?;

    for &progress in milestones(&job.kind) {
        tokio::time::sleep(ctx.milestone_delay).await;
        run.advance(progress).await?;
        tracing::debug!(progress, "Milestone reached");
    }

    let payload = compute(job, ctx.metrics.as_ref()).await?;
    run.complete(payload).await
}

/// Produce the category-specific payload.
async fn compute(job: &TestJob, metrics: &dyn MetricSource) -> Result<ResultPayload, ExecutionFault> {
    match &job.kind {
        TestKind::WhiteBox(params) => metrics
            .white_box(params, &job.options)
            .await
            .map(ResultPayload::from),
        TestKind::BlackBox(params) => metrics
            .black_box(params, &job.options)
            .await
            .map(ResultPayload::from),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("Execution panicked: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("Execution panicked: {s}")
    } else {
        "Execution panicked".to_string()
    }
}
