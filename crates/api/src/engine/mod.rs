//! Test execution engine.
//!
//! Contains the dispatcher that validates and launches submissions, the
//! per-category strategies, the run lifecycle that turns strategy steps into
//! status notifications, and the registry backing status queries.

pub mod dispatcher;
pub mod launcher;
pub mod metrics;
pub mod progress;
pub mod registry;
pub mod strategy;

pub use dispatcher::{Accepted, JobDispatcher};
pub use metrics::{MetricSource, RandomMetrics};
pub use registry::{Generation, RunRegistry, RunSnapshot};
