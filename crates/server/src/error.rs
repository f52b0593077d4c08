// crates/server/src/error.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::jobs::JobError;

/// Structured JSON error response for API errors
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// API error types that map to HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Task not ready: {0}")]
    NotReady(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<JobError> for ApiError {
    fn from(err: JobError) -> Self {
        match err {
            JobError::EmptyArticleLinks => ApiError::BadRequest(err.to_string()),
            JobError::NotFound(id) => ApiError::TaskNotFound(id.to_string()),
            JobError::NotReady(id) => ApiError::NotReady(id.to_string()),
            JobError::ArtifactRead { .. } => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            ApiError::TaskNotFound(id) => {
                tracing::warn!(task_id = %id, "Task not found");
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::with_details("Task not found", format!("Task ID: {}", id)),
                )
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!(message = %msg, "Bad request");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::with_details("Bad request", msg.clone()),
                )
            }
            ApiError::NotReady(id) => {
                tracing::warn!(task_id = %id, "Task not ready for collection");
                (
                    StatusCode::CONFLICT,
                    ErrorResponse::with_details("Task not ready", format!("Task ID: {}", id)),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!(message = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Internal server error"),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
