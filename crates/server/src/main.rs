// crates/server/src/main.rs
//! Metasynth server binary.
//!
//! Starts the Axum HTTP server for article discovery and meta-analysis
//! report generation. All state is in-memory; generated PDFs live on disk
//! only between job completion and download.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use metasynth_core::{CrossrefClient, GeminiConfig, GeminiGenerator, TextCleanup};
use metasynth_server::jobs::JobTracker;
use metasynth_server::{create_app, AppState};
use tracing_subscriber::EnvFilter;

/// Default port for the server.
const DEFAULT_PORT: u16 = 8000;

/// Get the server port from environment or use default.
fn get_port() -> u16 {
    std::env::var("METASYNTH_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Get the directory for finished report artifacts.
///
/// Priority:
/// 1. METASYNTH_ARTIFACT_DIR environment variable (explicit override)
/// 2. <system temp dir>/metasynth
fn get_artifact_dir() -> PathBuf {
    std::env::var("METASYNTH_ARTIFACT_DIR")
        .ok()
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("metasynth"))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (RUST_LOG overrides the default level)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Print banner
    eprintln!("\n\u{1f4c4} metasynth v{}\n", env!("CARGO_PKG_VERSION"));

    // Step 1: Build the text generation client
    let config = GeminiConfig::from_env();
    if !config.is_configured() {
        tracing::warn!(
            "GEMINI_API_KEY or GEMINI_MODEL not set; analysis jobs will fail until configured"
        );
    }
    let generator = Arc::new(GeminiGenerator::new(config));

    // Step 2: Build the job tracker and shared state
    let tracker = JobTracker::new(generator, TextCleanup::from_env(), get_artifact_dir());
    let state = AppState::new(tracker, CrossrefClient::from_env());

    // Step 3: Build the Axum app
    let app = create_app(state);

    // Step 4: Bind and serve
    let port = get_port();
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    eprintln!("  \u{2192} http://localhost:{}\n", port);
    tracing::info!(port, "Server started");

    axum::serve(listener, app).await?;

    Ok(())
}
