//! API route handlers for the metasynth server.

pub mod analysis;
pub mod health;
pub mod scrape;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Create the combined API router.
///
/// Routes:
/// - GET  /health - Health check
/// - POST /scrape-articles - Search Crossref for articles matching a prompt
/// - POST /start-analysis - Launch a background analysis job
/// - GET  /check-analysis/{task_id} - Poll a job, or download its report
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health::router())
        .merge(scrape::router())
        .merge(analysis::router())
        .with_state(state)
}
