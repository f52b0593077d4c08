// crates/server/src/state.rs
//! Application state for the Axum server.

use crate::jobs::JobTracker;
use metasynth_core::CrossrefClient;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    /// Server start time for uptime tracking.
    pub start_time: Instant,
    /// Tracker for background analysis jobs (submit, poll, collect).
    pub tracker: JobTracker,
    /// Crossref client for article discovery.
    pub crossref: CrossrefClient,
}

impl AppState {
    /// Create a new application state wrapped in an Arc for sharing.
    pub fn new(tracker: JobTracker, crossref: CrossrefClient) -> Arc<Self> {
        Arc::new(Self {
            start_time: Instant::now(),
            tracker,
            crossref,
        })
    }

    /// Get the server uptime in seconds.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
