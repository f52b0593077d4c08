// crates/server/src/lib.rs
//! Metasynth server library.
//!
//! This crate provides the Axum-based HTTP server for the metasynth
//! application. It serves a REST API for discovering research articles and
//! generating meta-analysis reports as downloadable PDFs.

pub mod error;
pub mod jobs;
pub mod routes;
pub mod state;

pub use error::*;
pub use routes::api_routes;
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the Axum application with all routes and middleware.
///
/// This sets up:
/// - API routes (health, scrape, analysis)
/// - CORS for development (allows any origin)
/// - Request tracing
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api_routes(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::testing::ScriptedGenerator;
    use crate::jobs::JobTracker;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use metasynth_core::{CrossrefClient, TextCleanup};
    use tower::ServiceExt;

    /// Build an app whose generator is scripted, so no test talks to a
    /// real model endpoint.
    fn test_app() -> Router {
        let tracker = JobTracker::new(
            Arc::new(ScriptedGenerator::always("A section of prose.")),
            TextCleanup::default(),
            std::env::temp_dir().join("metasynth-lib-tests"),
        );
        let state = AppState::new(tracker, CrossrefClient::from_env());
        create_app(state)
    }

    /// Helper to make a GET request to the app.
    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, body_str)
    }

    /// Helper to make a JSON POST request to the app.
    async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> (StatusCode, String) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, body_str)
    }

    // ========================================================================
    // Health Endpoint Tests
    // ========================================================================

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = test_app();
        let (status, body) = get(app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"status\":\"ok\""));
        assert!(body.contains("\"version\""));
        assert!(body.contains("\"uptime_secs\""));
    }

    #[tokio::test]
    async fn test_health_endpoint_response_structure() {
        let app = test_app();
        let (status, body) = get(app, "/health").await;

        assert_eq!(status, StatusCode::OK);

        // Parse the JSON to verify structure
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert!(json["version"].is_string());
        assert!(json["uptime_secs"].is_number());
    }

    // ========================================================================
    // Validation Tests
    // ========================================================================

    #[tokio::test]
    async fn test_scrape_rejects_missing_prompt() {
        let app = test_app();
        let (status, body) = post_json(app, "/scrape-articles", serde_json::json!({})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn test_scrape_rejects_blank_prompt() {
        let app = test_app();
        let (status, _body) =
            post_json(app, "/scrape-articles", serde_json::json!({"prompt": "   "})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_start_analysis_rejects_empty_links() {
        let app = test_app();
        let (status, body) =
            post_json(app, "/start-analysis", serde_json::json!({"article_links": []})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn test_check_analysis_unknown_task() {
        let app = test_app();
        let id = uuid::Uuid::new_v4();
        let (status, body) = get(app, &format!("/check-analysis/{id}")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn test_check_analysis_malformed_task_id() {
        let app = test_app();
        let (status, _body) = get(app, "/check-analysis/not-a-uuid").await;

        // Malformed ids are indistinguishable from unknown ones.
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // ========================================================================
    // CORS Tests
    // ========================================================================

    #[tokio::test]
    async fn test_cors_headers() {
        let app = test_app();

        // Make an OPTIONS preflight request
        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/health")
                    .header("Origin", "http://localhost:3000")
                    .header("Access-Control-Request-Method", "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // Check for CORS headers
        let headers = response.headers();
        assert!(
            headers.contains_key("access-control-allow-origin"),
            "Expected access-control-allow-origin header"
        );
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let app = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("Origin", "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let headers = response.headers();
        let allow_origin = headers.get("access-control-allow-origin");
        assert!(allow_origin.is_some());
        assert_eq!(allow_origin.unwrap(), "*");
    }

    // ========================================================================
    // 404 Tests
    // ========================================================================

    #[tokio::test]
    async fn test_404_for_unknown_route() {
        let app = test_app();
        let (status, _body) = get(app, "/nonexistent").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_404_for_root_path() {
        let app = test_app();
        let (status, _body) = get(app, "/").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // ========================================================================
    // App Creation Tests
    // ========================================================================

    #[test]
    fn test_create_app() {
        // Should not panic
        let _app = test_app();
    }

    #[tokio::test]
    async fn test_multiple_requests() {
        // Verify the app can handle multiple requests
        let app = test_app();

        // First request
        let (status1, _) = get(app.clone(), "/health").await;
        assert_eq!(status1, StatusCode::OK);

        // Second request
        let (status2, _) = get(app, "/health").await;
        assert_eq!(status2, StatusCode::OK);
    }
}
