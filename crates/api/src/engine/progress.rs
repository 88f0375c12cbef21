//! Per-run status lifecycle.
//!
//! A [`JobRun`] is owned by exactly one execution unit and is the only way
//! a strategy talks to the [`Notifier`]. It enforces the lifecycle locally:
//! progress never decreases, `completed` only follows `running(100)`, and
//! nothing is emitted after a terminal notification.

use std::sync::Arc;

use redteam_core::error::ExecutionFault;
use redteam_core::results::ResultPayload;
use redteam_core::status::StatusNotification;
use redteam_core::types::{Progress, TestId, PROGRESS_COMPLETE};
use redteam_events::Notifier;

use crate::engine::registry::{Generation, RunRegistry};

/// Error text used when a fault carries no description.
const UNKNOWN_FAULT: &str = "Unknown execution fault";

/// Local view of where a run is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Pending,
    Running { progress: Progress },
    Completed,
    Failed,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

pub struct JobRun {
    test_id: TestId,
    generation: Generation,
    state: RunState,
    notifier: Arc<dyn Notifier>,
    registry: RunRegistry,
}

impl JobRun {
    /// `generation` is the value [`RunRegistry::register`] returned when
    /// this run was launched.
    pub fn new(
        test_id: TestId,
        generation: Generation,
        notifier: Arc<dyn Notifier>,
        registry: RunRegistry,
    ) -> Self {
        Self {
            test_id,
            generation,
            state: RunState::Pending,
            notifier,
            registry,
        }
    }

    pub fn test_id(&self) -> &str {
        &self.test_id
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Emit `running` with `progress`.
    ///
    /// Fails without emitting if the run is finished, if `progress` exceeds
    /// 100, or if it is lower than the last reported value.
    pub async fn advance(&mut self, progress: Progress) -> Result<(), ExecutionFault> {
        match self.state {
            RunState::Completed | RunState::Failed => {
                return Err(ExecutionFault::new("Run already finished"));
            }
            RunState::Running { progress: last } if progress < last => {
                return Err(ExecutionFault::new(format!(
                    "Progress regressed from {last} to {progress}"
                )));
            }
            _ if progress > PROGRESS_COMPLETE => {
                return Err(ExecutionFault::new(format!(
                    "Progress {progress} exceeds {PROGRESS_COMPLETE}"
                )));
            }
            _ => {}
        }

        self.state = RunState::Running { progress };
        self.publish(StatusNotification::running(self.test_id.clone(), progress))
            .await;
        Ok(())
    }

    /// Emit the `completed` terminal notification.
    ///
    /// Only legal once the run has reported `running(100)`.
    pub async fn complete(&mut self, payload: ResultPayload) -> Result<(), ExecutionFault> {
        if self.state
            != (RunState::Running {
                progress: PROGRESS_COMPLETE,
            })
        {
            return Err(ExecutionFault::new(format!(
                "Cannot complete a run in state {:?}",
                self.state
            )));
        }

        self.state = RunState::Completed;
        self.publish(StatusNotification::completed(self.test_id.clone(), payload))
            .await;
        Ok(())
    }

    /// Emit the `failed` terminal notification.
    ///
    /// A run that already reached a terminal state stays there; the call is
    /// logged and nothing is emitted.
    pub async fn fail(&mut self, message: &str) {
        if self.state.is_terminal() {
            tracing::warn!(
                test_id = %self.test_id,
                state = ?self.state,
                error = message,
                "Ignoring failure reported after terminal state",
            );
            return;
        }

        let message = if message.trim().is_empty() {
            UNKNOWN_FAULT
        } else {
            message
        };

        self.state = RunState::Failed;
        self.publish(StatusNotification::failed(self.test_id.clone(), message))
            .await;
    }

    async fn publish(&self, notification: StatusNotification) {
        if !self.registry.record(self.generation, &notification) {
            tracing::debug!(
                test_id = %self.test_id,
                status = %notification.status,
                "Run superseded by a resubmission, snapshot left unchanged",
            );
        }
        self.notifier.notify(&notification).await;
    }
}
