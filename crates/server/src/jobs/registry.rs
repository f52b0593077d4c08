// crates/server/src/jobs/registry.rs
//! Synchronized in-memory registry of job records.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use uuid::Uuid;

use super::types::{JobError, JobId, JobSnapshot, JobStatus};

/// One job's full record. Callers outside the jobs module only ever see
/// [`JobSnapshot`]s cloned out under the lock.
#[derive(Debug, Clone)]
struct JobRecord {
    status: JobStatus,
    progress: u8,
    status_message: String,
    artifact: Option<PathBuf>,
    error: Option<String>,
}

/// Registry of all outstanding jobs.
///
/// Every access goes through a method that takes the single map lock, so
/// polling never observes a torn update. Progress is monotonic per job,
/// and terminal records are immutable: updates addressed to a completed or
/// failed job are dropped.
pub struct JobRegistry {
    jobs: RwLock<HashMap<JobId, JobRecord>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a fresh processing record and return its id.
    pub fn create(&self) -> JobId {
        let id = Uuid::new_v4();
        let record = JobRecord {
            status: JobStatus::Processing,
            progress: 0,
            status_message: "Queued for processing".to_string(),
            artifact: None,
            error: None,
        };
        match self.jobs.write() {
            Ok(mut jobs) => {
                jobs.insert(id, record);
            }
            Err(e) => tracing::error!("RwLock poisoned writing jobs map: {e}"),
        }
        id
    }

    /// Number of jobs currently tracked.
    pub fn len(&self) -> usize {
        match self.jobs.read() {
            Ok(jobs) => jobs.len(),
            Err(e) => {
                tracing::error!("RwLock poisoned reading jobs map: {e}");
                0
            }
        }
    }

    /// True when the registry tracks no jobs.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Update progress and message for a processing job.
    ///
    /// Progress keeps `max(old, new)` and stays below 100: only
    /// [`complete`](Self::complete) writes 100, so a poll reading 100 always
    /// means the artifact is ready. The message is replaced. No-op for
    /// unknown ids and terminal jobs.
    pub fn set_progress(&self, id: JobId, progress: u8, message: impl Into<String>) {
        match self.jobs.write() {
            Ok(mut jobs) => {
                if let Some(record) = jobs.get_mut(&id) {
                    if !record.status.is_terminal() {
                        record.progress = record.progress.max(progress.min(99));
                        record.status_message = message.into();
                    }
                }
            }
            Err(e) => tracing::error!("RwLock poisoned writing jobs map: {e}"),
        }
    }

    /// Transition a processing job to completed, recording its artifact.
    /// No-op for unknown ids and already-terminal jobs.
    pub fn complete(&self, id: JobId, artifact: PathBuf) {
        match self.jobs.write() {
            Ok(mut jobs) => {
                if let Some(record) = jobs.get_mut(&id) {
                    if !record.status.is_terminal() {
                        record.status = JobStatus::Completed;
                        record.progress = 100;
                        record.status_message = "Analysis complete".to_string();
                        record.artifact = Some(artifact);
                    }
                }
            }
            Err(e) => tracing::error!("RwLock poisoned writing jobs map: {e}"),
        }
    }

    /// Transition a processing job to failed, recording the cause.
    /// No-op for unknown ids and already-terminal jobs.
    pub fn fail(&self, id: JobId, error: impl Into<String>) {
        match self.jobs.write() {
            Ok(mut jobs) => {
                if let Some(record) = jobs.get_mut(&id) {
                    if !record.status.is_terminal() {
                        record.status = JobStatus::Failed;
                        record.status_message = "Analysis failed".to_string();
                        record.error = Some(error.into());
                    }
                }
            }
            Err(e) => tracing::error!("RwLock poisoned writing jobs map: {e}"),
        }
    }

    /// Consistent point-in-time view of one job.
    pub fn poll(&self, id: JobId) -> Result<JobSnapshot, JobError> {
        match self.jobs.read() {
            Ok(jobs) => jobs
                .get(&id)
                .map(|record| JobSnapshot {
                    status: record.status,
                    progress: record.progress,
                    status_message: record.status_message.clone(),
                    error: record.error.clone(),
                })
                .ok_or(JobError::NotFound(id)),
            Err(e) => {
                tracing::error!("RwLock poisoned reading jobs map: {e}");
                Err(JobError::NotFound(id))
            }
        }
    }

    /// Atomically remove a completed job and return its artifact path.
    ///
    /// The check and the removal happen under one write-lock hold, so
    /// exactly one of any set of concurrent callers receives the path;
    /// the rest observe `NotFound`. Non-completed jobs are left untouched
    /// and reported `NotReady`.
    pub fn claim_artifact(&self, id: JobId) -> Result<PathBuf, JobError> {
        let mut jobs = match self.jobs.write() {
            Ok(jobs) => jobs,
            Err(e) => {
                tracing::error!("RwLock poisoned writing jobs map: {e}");
                return Err(JobError::NotFound(id));
            }
        };

        match jobs.get(&id) {
            None => Err(JobError::NotFound(id)),
            Some(record) if record.status != JobStatus::Completed => Err(JobError::NotReady(id)),
            Some(_) => jobs
                .remove(&id)
                .and_then(|record| record.artifact)
                .ok_or(JobError::NotFound(id)),
        }
    }
}

impl Default for JobRegistry {
    fn default() -> Self {
        Self::new()
    }
}
