// crates/server/src/routes/analysis.rs
//! Analysis job routes.
//!
//! - POST /start-analysis: launch a background report job
//! - GET  /check-analysis/{task_id}: poll progress or download the finished PDF

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::jobs::{JobId, JobStatus};
use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

/// Request body for POST /start-analysis.
#[derive(Debug, Deserialize)]
pub struct StartAnalysisRequest {
    /// Links to the articles the report should synthesize.
    #[serde(default)]
    pub article_links: Vec<String>,
}

/// Response for POST /start-analysis.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct StartAnalysisResponse {
    pub task_id: JobId,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /start-analysis - Launch a background analysis job.
///
/// Returns the task id immediately; generation runs in a spawned task.
async fn start_analysis(
    State(state): State<Arc<AppState>>,
    Json(body): Json<StartAnalysisRequest>,
) -> ApiResult<Json<StartAnalysisResponse>> {
    let task_id = state.tracker.submit(body.article_links)?;
    Ok(Json(StartAnalysisResponse { task_id }))
}

/// GET /check-analysis/{task_id} - Poll a job, or download its report.
///
/// While the job is processing (or after it failed) this returns the
/// status snapshot as JSON. Once the job has completed, the response is
/// the PDF itself as an attachment; the record and artifact are removed
/// in the same step, so exactly one request receives the file and every
/// later request sees 404.
async fn check_analysis(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    // Malformed ids behave like unknown ones.
    let id: JobId = task_id
        .parse::<Uuid>()
        .map_err(|_| ApiError::TaskNotFound(task_id.clone()))?;

    let snapshot = state.tracker.poll(id)?;
    if snapshot.status != JobStatus::Completed {
        return Ok(Json(snapshot).into_response());
    }

    let bytes = state.tracker.collect(id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"research_analysis.pdf\"",
            ),
        ],
        bytes,
    )
        .into_response())
}

// ============================================================================
// Router
// ============================================================================

/// Build the analysis router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/start-analysis", post(start_analysis))
        .route("/check-analysis/{task_id}", get(check_analysis))
}

// ============================================================================
// Tests
// ============================================================================
