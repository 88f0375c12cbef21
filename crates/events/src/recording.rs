//! In-process notifier that keeps every notification it receives.
//!
//! Used wherever the sink should be observed directly instead of over HTTP:
//! orchestration tests and local dry runs.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use redteam_core::status::StatusNotification;
use tokio::sync::Notify;

use crate::notifier::Notifier;

#[derive(Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<StatusNotification>>,
    changed: Notify,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every notification received so far, in arrival order.
    pub fn notifications(&self) -> Vec<StatusNotification> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Notifications for one test, in arrival order.
    pub fn for_test(&self, test_id: &str) -> Vec<StatusNotification> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|n| n.test_id == test_id)
            .cloned()
            .collect()
    }

    /// Wait until `test_id` has a terminal notification and return its history.
    ///
    /// Returns `None` if `timeout` elapses first.
    pub async fn wait_for_terminal(
        &self,
        test_id: &str,
        timeout: Duration,
    ) -> Option<Vec<StatusNotification>> {
        let wait = async {
            loop {
                let notified = self.changed.notified();
                tokio::pin!(notified);
                notified.as_mut().enable();

                let history = self.for_test(test_id);
                if history.iter().any(|n| n.status.is_terminal()) {
                    return history;
                }
                notified.await;
            }
        };
        tokio::time::timeout(timeout, wait).await.ok()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: &StatusNotification) {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());
        self.changed.notify_waiters();
    }
}
