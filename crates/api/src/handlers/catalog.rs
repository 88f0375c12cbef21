//! Handlers for the static catalogs clients use to build a submission.
//!
//! None of these depend on run state.

use axum::Json;
use redteam_core::catalog::{ATTACK_CATEGORIES, DEFENSE_TYPES, SUPPORTED_MODELS};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: &'static [&'static str],
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct AttackCategoriesResponse {
    pub categories: &'static [&'static str],
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct DefensesResponse {
    pub defenses: &'static [&'static str],
    pub count: usize,
}

/// GET /api/models
pub async fn list_models() -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: SUPPORTED_MODELS,
        count: SUPPORTED_MODELS.len(),
    })
}

/// GET /api/attack-categories
pub async fn list_attack_categories() -> Json<AttackCategoriesResponse> {
    Json(AttackCategoriesResponse {
        categories: ATTACK_CATEGORIES,
        count: ATTACK_CATEGORIES.len(),
    })
}

/// GET /api/defenses
pub async fn list_defenses() -> Json<DefensesResponse> {
    Json(DefensesResponse {
        defenses: DEFENSE_TYPES,
        count: DEFENSE_TYPES.len(),
    })
}
