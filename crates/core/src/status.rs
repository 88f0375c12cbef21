//! Run lifecycle states and the status notification sent to the sink.
//!
//! Wire body: `{ "testId", "status", "results", "error" }`. While running,
//! `results` nests `{ "progress": n }`; on completion it is the result
//! payload; on failure it is `null` and `error` holds the description.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::results::ResultPayload;
use crate::types::{Progress, TestId};

/// Lifecycle state of a run.
///
/// `pending -> running(p) -> ... -> completed | failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl TestStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub progress: Progress,
}

/// Contents of the `results` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NotificationResults {
    Progress(ProgressUpdate),
    Final(ResultPayload),
}

/// One status update for one test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusNotification {
    pub test_id: TestId,
    pub status: TestStatus,
    pub results: Option<NotificationResults>,
    pub error: Option<String>,
}

impl StatusNotification {
    pub fn running(test_id: impl Into<TestId>, progress: Progress) -> Self {
        Self {
            test_id: test_id.into(),
            status: TestStatus::Running,
            results: Some(NotificationResults::Progress(ProgressUpdate { progress })),
            error: None,
        }
    }

    pub fn completed(test_id: impl Into<TestId>, payload: ResultPayload) -> Self {
        Self {
            test_id: test_id.into(),
            status: TestStatus::Completed,
            results: Some(NotificationResults::Final(payload)),
            error: None,
        }
    }

    pub fn failed(test_id: impl Into<TestId>, error: impl Into<String>) -> Self {
        Self {
            test_id: test_id.into(),
            status: TestStatus::Failed,
            results: None,
            error: Some(error.into()),
        }
    }

    /// Progress carried by a `running` notification.
    pub fn progress(&self) -> Option<Progress> {
        match self.results {
            Some(NotificationResults::Progress(ProgressUpdate { progress })) => Some(progress),
            _ => None,
        }
    }

    /// Result payload carried by a `completed` notification.
    pub fn payload(&self) -> Option<&ResultPayload> {
        match &self.results {
            Some(NotificationResults::Final(payload)) => Some(payload),
            _ => None,
        }
    }
}
