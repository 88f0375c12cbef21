use std::sync::Arc;

use crate::engine::{JobDispatcher, RunRegistry};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Validates submissions and launches test runs.
    pub dispatcher: Arc<JobDispatcher>,
    /// Latest known status of each run.
    pub registry: RunRegistry,
}
