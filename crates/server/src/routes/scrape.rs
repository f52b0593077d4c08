// crates/server/src/routes/scrape.rs
//! Article discovery route.
//!
//! - POST /scrape-articles: search Crossref for works matching a prompt

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use metasynth_core::Article;

// ============================================================================
// Request Types
// ============================================================================

/// Request body for POST /scrape-articles.
#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    /// Free-text research topic to search for.
    #[serde(default)]
    pub prompt: Option<String>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /scrape-articles - Search Crossref for articles matching the prompt.
///
/// Upstream failures are not surfaced: the search degrades to an empty
/// list so callers can always iterate the response.
async fn scrape_articles(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ScrapeRequest>,
) -> ApiResult<Json<Vec<Article>>> {
    let prompt = body
        .prompt
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No prompt provided".to_string()))?;

    Ok(Json(state.crossref.search(prompt).await))
}

// ============================================================================
// Router
// ============================================================================

/// Build the scrape router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/scrape-articles", post(scrape_articles))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_creation() {
        let _router = router();
    }

    #[test]
    fn test_scrape_request_deserialize() {
        let json = r#"{"prompt": "machine learning in oncology"}"#;
        let req: ScrapeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.prompt.as_deref(), Some("machine learning in oncology"));
    }

    #[test]
    fn test_scrape_request_missing_prompt() {
        let req: ScrapeRequest = serde_json::from_str("{}").unwrap();
        assert!(req.prompt.is_none());
    }
}
