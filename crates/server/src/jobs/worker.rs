// crates/server/src/jobs/worker.rs
//! The background unit of work for one analysis job.

use std::path::PathBuf;
use std::sync::Arc;

use metasynth_core::{
    DocumentStyle, GenerateError, ReportDocument, ReportSection, TextCleanup, TextGenerator,
};

use super::registry::JobRegistry;
use super::types::JobId;

/// Title of every assembled report.
const REPORT_TITLE: &str = "Research Analysis";

/// Progress floor once the worker has started.
const SETUP_PROGRESS: u8 = 10;
/// Progress budget spread equally across the section loop.
const SECTION_BUDGET: u8 = 70;

/// Progress after `done` of `total` sections: the setup floor plus an
/// equal share of the section budget per completed section.
fn section_progress(done: usize, total: usize) -> u8 {
    SETUP_PROGRESS + (SECTION_BUDGET as usize * done / total) as u8
}

/// Placeholder body recorded for a section whose generation failed.
fn failure_placeholder(section: ReportSection, cause: &GenerateError) -> String {
    format!("Error generating {}: {}", section.key(), cause)
}

/// Generate every catalogue section in order and assemble the document.
///
/// A failed section keeps its place: the error collapses into a
/// placeholder body and the loop moves on, so the document always carries
/// the full section set. `on_section` observes `(done, total)` after each
/// section for progress reporting.
async fn generate_document(
    generator: &dyn TextGenerator,
    cleanup: &TextCleanup,
    article_links: &[String],
    mut on_section: impl FnMut(usize, usize),
) -> ReportDocument {
    let total = ReportSection::ALL.len();
    let mut document = ReportDocument::new(REPORT_TITLE);

    for (index, section) in ReportSection::ALL.into_iter().enumerate() {
        let t0 = std::time::Instant::now();
        let body = match generator.generate(&section.prompt(article_links)).await {
            Ok(text) => cleanup.clean(&text),
            Err(e) => {
                tracing::warn!(
                    section = section.key(),
                    error = %e,
                    "Section generation failed"
                );
                failure_placeholder(section, &e)
            }
        };
        tracing::debug!(
            section = section.key(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Section finished"
        );
        document.push_section(section.heading(), body);
        on_section(index + 1, total);
    }

    document
}

/// Drive one analysis job to a terminal state.
///
/// A failed section becomes placeholder text and the loop continues; the
/// job as a whole fails only on service misconfiguration before the loop,
/// or on a render/write failure after it. All record writes go through the
/// registry, which enforces monotonic progress and terminal immutability.
pub(crate) async fn run_analysis(
    registry: Arc<JobRegistry>,
    generator: Arc<dyn TextGenerator>,
    cleanup: TextCleanup,
    artifact_dir: PathBuf,
    id: JobId,
    article_links: Vec<String>,
) {
    registry.set_progress(id, SETUP_PROGRESS, "Initializing text generation");

    if let Err(e) = generator.health_check().await {
        tracing::error!(task_id = %id, error = %e, "Generation service unavailable");
        registry.fail(id, e.to_string());
        return;
    }

    let document = generate_document(
        generator.as_ref(),
        &cleanup,
        &article_links,
        |done, total| {
            registry.set_progress(
                id,
                section_progress(done, total),
                format!("Generated {done} of {total} sections"),
            );
        },
    )
    .await;

    registry.set_progress(id, SETUP_PROGRESS + SECTION_BUDGET, "Rendering document");
    let rendered =
        tokio::task::spawn_blocking(move || document.render_pdf(&DocumentStyle::default())).await;
    let bytes = match rendered {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(e)) => {
            tracing::error!(task_id = %id, error = %e, "Document rendering failed");
            registry.fail(id, e.to_string());
            return;
        }
        Err(e) => {
            tracing::error!(task_id = %id, error = %e, "Render task panicked");
            registry.fail(id, format!("Render task failed: {e}"));
            return;
        }
    };

    if let Err(e) = tokio::fs::create_dir_all(&artifact_dir).await {
        tracing::error!(
            task_id = %id,
            dir = %artifact_dir.display(),
            error = %e,
            "Failed to create artifact directory"
        );
        registry.fail(id, format!("Failed to create artifact directory: {e}"));
        return;
    }

    let path = artifact_dir.join(format!("{id}.pdf"));
    if let Err(e) = tokio::fs::write(&path, &bytes).await {
        tracing::error!(
            task_id = %id,
            path = %path.display(),
            error = %e,
            "Failed to write artifact"
        );
        // An interrupted write can leave a truncated file; a failed job
        // keeps no artifact.
        let _ = tokio::fs::remove_file(&path).await;
        registry.fail(id, format!("Failed to write artifact: {e}"));
        return;
    }

    registry.complete(id, path);
    tracing::info!(task_id = %id, "Analysis complete");
}
