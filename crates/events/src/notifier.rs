//! The notification seam between runs and the outside world.

use async_trait::async_trait;
use redteam_core::status::StatusNotification;

/// Delivers status notifications for test runs.
///
/// `notify` has no error channel: delivery is best-effort and at most once
/// per call. Implementations log their own failures and return normally so
/// a delivery problem can never abort or retry the calling run.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &StatusNotification);
}
