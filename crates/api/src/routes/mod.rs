pub mod catalog;
pub mod health;
pub mod test_runs;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /tests/submit                 submit a test run (POST)
/// /tests/{test_id}/status       latest run snapshot
///
/// /models                       white box model catalog
/// /attack-categories            black box attack category catalog
/// /defenses                     defense catalog
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/tests", test_runs::router())
        .merge(catalog::router())
}
