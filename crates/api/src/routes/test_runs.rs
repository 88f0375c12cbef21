//! Route definitions for the `/tests` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::test_runs;
use crate::state::AppState;

/// Routes mounted at `/tests`.
///
/// ```text
/// POST   /submit              -> submit_test
/// GET    /{test_id}/status    -> get_test_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submit", post(test_runs::submit_test))
        .route("/{test_id}/status", get(test_runs::get_test_status))
}
