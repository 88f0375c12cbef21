//! Outbound status notification for red-team test runs.
//!
//! - [`Notifier`]: the seam every run reports through. Implementations
//!   never fail outward.
//! - [`WebhookNotifier`]: best-effort HTTP POST to the configured sink.
//! - [`RecordingNotifier`]: in-process capture of every notification.

pub mod delivery;
pub mod notifier;
pub mod recording;

pub use delivery::webhook::{WebhookError, WebhookNotifier};
pub use notifier::Notifier;
pub use recording::RecordingNotifier;
