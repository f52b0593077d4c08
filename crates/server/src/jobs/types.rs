// crates/server/src/jobs/types.rs
//! Types for the analysis job system.

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for an analysis job.
///
/// Random v4: ids never repeat across the full history of the process,
/// including jobs already collected and deleted.
pub type JobId = Uuid;

/// Lifecycle state of an analysis job.
///
/// Every job moves from `Processing` to exactly one of `Completed` or
/// `Failed`. There is no stored "not found" state: unknown ids surface as
/// [`JobError::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    /// Terminal states accept no further updates.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// Point-in-time view of one job, as returned to polling clients.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct JobSnapshot {
    pub status: JobStatus,
    pub progress: u8,
    pub status_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Errors from job submission, polling, and collection.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("article_links must contain at least one link")]
    EmptyArticleLinks,

    #[error("No task found with id {0}")]
    NotFound(JobId),

    #[error("Task {0} has not completed yet")]
    NotReady(JobId),

    #[error("Failed to read artifact for task {id}: {source}")]
    ArtifactRead {
        id: JobId,
        #[source]
        source: std::io::Error,
    },
}
