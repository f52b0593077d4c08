// crates/server/src/jobs/tracker.rs
//! Job tracker: owns the registry and launches background analysis work.

use std::path::PathBuf;
use std::sync::Arc;

use metasynth_core::{TextCleanup, TextGenerator};

use super::registry::JobRegistry;
use super::types::{JobError, JobId, JobSnapshot};
use super::worker;

/// Owns the job registry plus the collaborators every background worker
/// needs. One tracker per process, shared through `AppState`.
pub struct JobTracker {
    registry: Arc<JobRegistry>,
    generator: Arc<dyn TextGenerator>,
    cleanup: TextCleanup,
    artifact_dir: PathBuf,
}

impl JobTracker {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        cleanup: TextCleanup,
        artifact_dir: PathBuf,
    ) -> Self {
        Self {
            registry: Arc::new(JobRegistry::new()),
            generator,
            cleanup,
            artifact_dir,
        }
    }

    /// Validate the link list, create a job record, and launch the
    /// background worker. Returns the id immediately; progress is
    /// observed via [`poll`](Self::poll).
    pub fn submit(&self, article_links: Vec<String>) -> Result<JobId, JobError> {
        if article_links.is_empty() {
            return Err(JobError::EmptyArticleLinks);
        }

        let id = self.registry.create();
        tracing::info!(task_id = %id, links = article_links.len(), "Analysis job submitted");

        let registry = Arc::clone(&self.registry);
        let generator = Arc::clone(&self.generator);
        let cleanup = self.cleanup.clone();
        let artifact_dir = self.artifact_dir.clone();
        tokio::spawn(async move {
            worker::run_analysis(registry, generator, cleanup, artifact_dir, id, article_links)
                .await;
        });

        Ok(id)
    }

    /// Consistent point-in-time view of one job.
    pub fn poll(&self, id: JobId) -> Result<JobSnapshot, JobError> {
        self.registry.poll(id)
    }

    /// Collect a completed job's artifact.
    ///
    /// Atomically claims the record (first caller wins), reads the PDF
    /// bytes, then deletes the file. The file is deleted even when the
    /// read fails; collection is at-most-once either way.
    pub async fn collect(&self, id: JobId) -> Result<Vec<u8>, JobError> {
        let path = self.registry.claim_artifact(id)?;

        let bytes = tokio::fs::read(&path).await;
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!(
                task_id = %id,
                path = %path.display(),
                error = %e,
                "Failed to delete artifact"
            );
        }

        match bytes {
            Ok(bytes) => {
                tracing::info!(task_id = %id, bytes = bytes.len(), "Artifact collected");
                Ok(bytes)
            }
            Err(source) => Err(JobError::ArtifactRead { id, source }),
        }
    }
}
