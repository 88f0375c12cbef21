//! Handlers for the `/tests` resource.
//!
//! Submission is fire-and-forget: a successful response means the run was
//! launched, not that it finished. Progress and results go to the webhook
//! sink; the status endpoint exposes the latest snapshot seen locally.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use redteam_core::error::CoreError;
use redteam_core::submission::JobSubmission;
use redteam_core::types::TestId;
use serde::Serialize;

use crate::engine::RunSnapshot;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    pub test_id: TestId,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestStatusResponse {
    pub success: bool,
    pub test_id: TestId,
    #[serde(flatten)]
    pub snapshot: RunSnapshot,
}

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

/// POST /api/tests/submit
///
/// Validate the submission and launch its run. Returns 200 immediately on
/// acceptance; an unreadable body or a failed validation returns 400 and
/// launches nothing.
pub async fn submit_test(
    State(state): State<AppState>,
    payload: Result<Json<JobSubmission>, JsonRejection>,
) -> AppResult<Json<SubmitResponse>> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let accepted = state.dispatcher.submit(&input)?;

    Ok(Json(SubmitResponse {
        success: true,
        test_id: accepted.test_id,
        message: "Test submitted successfully",
    }))
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// GET /api/tests/{test_id}/status
///
/// Latest snapshot of the run. 404 if the id was never submitted here or
/// its snapshot has been swept by retention.
pub async fn get_test_status(
    State(state): State<AppState>,
    Path(test_id): Path<TestId>,
) -> AppResult<Json<TestStatusResponse>> {
    let snapshot = state.registry.get(&test_id).ok_or(CoreError::NotFound {
        entity: "Test",
        id: test_id.clone(),
    })?;

    Ok(Json(TestStatusResponse {
        success: true,
        test_id,
        snapshot,
    }))
}
