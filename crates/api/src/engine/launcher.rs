//! How an accepted run becomes an independent unit of work.
//!
//! The dispatcher only ever hands a prepared future to a [`TaskLauncher`]
//! and forgets it. Tracking, awaiting, or cancelling runs would be a
//! different launcher; the dispatcher contract stays the same.

use futures::future::BoxFuture;

pub trait TaskLauncher: Send + Sync {
    fn launch(&self, test_id: &str, task: BoxFuture<'static, ()>);
}

/// Spawns each run on the Tokio runtime and drops the join handle.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedLauncher;

impl TaskLauncher for DetachedLauncher {
    fn launch(&self, test_id: &str, task: BoxFuture<'static, ()>) {
        tracing::debug!(test_id, "Launching detached test run");
        drop(tokio::spawn(task));
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::FutureExt;
    use tokio::sync::oneshot;

    use super::*;

    #[tokio::test]
    async fn detached_task_runs_to_completion() {
        let (tx, rx) = oneshot::channel();
        DetachedLauncher.launch(
            "t1",
            async move {
                let _ = tx.send(42);
            }
            .boxed(),
        );

        let value = tokio::time::timeout(Duration::from_secs(5), rx)
            .await
            .expect("task should finish")
            .expect("sender should not be dropped");
        assert_eq!(value, 42);
    }
}
