use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Catalog routes, merged at the `/api` root.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/models", get(catalog::list_models))
        .route("/attack-categories", get(catalog::list_attack_categories))
        .route("/defenses", get(catalog::list_defenses))
}
