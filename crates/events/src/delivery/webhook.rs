//! Best-effort webhook delivery.
//!
//! [`WebhookNotifier`] POSTs each [`StatusNotification`] as JSON to one fixed
//! sink URL. A failed attempt is logged and dropped: there is no retry, so a
//! slow or dead sink delays the calling run by at most one request timeout.

use std::time::Duration;

use async_trait::async_trait;
use redteam_core::status::StatusNotification;

use crate::notifier::Notifier;

/// Default HTTP request timeout for a single delivery attempt.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for webhook delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// WebhookNotifier
// ---------------------------------------------------------------------------

/// Delivers status notifications to the external sink endpoint.
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    /// Create a notifier for `url` with a per-request `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, WebhookError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Execute a single POST request and check the response status.
    pub async fn deliver(&self, notification: &StatusNotification) -> Result<(), WebhookError> {
        let response = self
            .client
            .post(&self.url)
            .json(notification)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(WebhookError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, notification: &StatusNotification) {
        match self.deliver(notification).await {
            Ok(()) => {
                tracing::debug!(
                    test_id = %notification.test_id,
                    status = %notification.status,
                    "Status notification delivered",
                );
            }
            Err(e) => {
                tracing::warn!(
                    test_id = %notification.test_id,
                    status = %notification.status,
                    url = %self.url,
                    error = %e,
                    "Failed to deliver status notification",
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_keeps_url() {
        let notifier = WebhookNotifier::new("http://localhost:3000/hook", DEFAULT_REQUEST_TIMEOUT)
            .expect("client should build");
        assert_eq!(notifier.url(), "http://localhost:3000/hook");
    }

    #[test]
    fn webhook_error_display_http_status() {
        let err = WebhookError::HttpStatus(502);
        assert_eq!(err.to_string(), "Webhook returned HTTP 502");
    }

    #[test]
    fn webhook_error_display_request() {
        // Build a reqwest error from an invalid URL.
        let req_err = reqwest::Client::new().get("://bad").build().unwrap_err();
        let err = WebhookError::Request(req_err);
        assert!(err.to_string().contains("HTTP request failed"));
    }

    #[tokio::test]
    async fn notify_swallows_invalid_url() {
        let notifier = WebhookNotifier::new("://bad", DEFAULT_REQUEST_TIMEOUT).unwrap();
        let notification = StatusNotification::running("t1", 0);

        assert!(notifier.deliver(&notification).await.is_err());
        // Must return normally.
        notifier.notify(&notification).await;
    }
}
