// crates/core/src/crossref.rs
//! Crossref metadata lookup.
//!
//! One stateless outbound request per search. Lookup failures never fail
//! the caller's request: any transport, HTTP, or decode error logs a
//! warning and yields an empty list.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Env var overriding the Crossref API base URL.
pub const CROSSREF_BASE_URL_ENV: &str = "CROSSREF_BASE_URL";

const DEFAULT_BASE_URL: &str = "https://api.crossref.org";
const DEFAULT_ROWS: u32 = 10;
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// One candidate article returned by the metadata lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct Article {
    pub title: String,
    pub doi: String,
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
struct WorksResponse {
    #[serde(default)]
    message: WorksMessage,
}

#[derive(Debug, Default, Deserialize)]
struct WorksMessage {
    #[serde(default)]
    items: Vec<WorkItem>,
}

#[derive(Debug, Deserialize)]
struct WorkItem {
    #[serde(default)]
    title: Vec<String>,
    #[serde(rename = "DOI")]
    doi: Option<String>,
}

impl From<WorkItem> for Article {
    fn from(item: WorkItem) -> Self {
        let title = item
            .title
            .into_iter()
            .next()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "No Title".to_string());
        let doi = item
            .doi
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| "No DOI".to_string());
        let url = if doi != "No DOI" {
            format!("https://doi.org/{doi}")
        } else {
            "No URL".to_string()
        };
        Self { title, doi, url }
    }
}

/// Client for the Crossref works search.
#[derive(Debug, Clone)]
pub struct CrossrefClient {
    client: reqwest::Client,
    base_url: String,
    rows: u32,
}

impl CrossrefClient {
    /// Create a client against an explicit base URL (tests point this at
    /// a mock server).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            rows: DEFAULT_ROWS,
        }
    }

    /// Create a client from [`CROSSREF_BASE_URL_ENV`], falling back to the
    /// public API.
    pub fn from_env() -> Self {
        let base_url = std::env::var(CROSSREF_BASE_URL_ENV)
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Search works matching a free-text query. Fails soft: the caller
    /// always gets a list, possibly empty.
    pub async fn search(&self, query: &str) -> Vec<Article> {
        match self.try_search(query).await {
            Ok(articles) => {
                tracing::debug!(count = articles.len(), "Crossref lookup complete");
                articles
            }
            Err(e) => {
                tracing::warn!(error = %e, "Crossref lookup failed");
                Vec::new()
            }
        }
    }

    async fn try_search(&self, query: &str) -> Result<Vec<Article>, reqwest::Error> {
        let url = format!("{}/works", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("query", query)])
            .query(&[("rows", self.rows)])
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .send()
            .await?
            .error_for_status()?;

        let data: WorksResponse = resp.json().await?;
        Ok(data.message.items.into_iter().map(Article::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_search_maps_items() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/works"))
            .and(query_param("query", "banana disease"))
            .and(query_param("rows", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": {
                    "items": [
                        {"title": ["Sustainability of banana agroecosystems"], "DOI": "10.1/a"},
                        {"title": [], "DOI": "10.1/b"},
                        {"title": ["Untraceable paper"]}
                    ]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = CrossrefClient::new(server.uri());
        let articles = client.search("banana disease").await;

        assert_eq!(
            articles,
            vec![
                Article {
                    title: "Sustainability of banana agroecosystems".to_string(),
                    doi: "10.1/a".to_string(),
                    url: "https://doi.org/10.1/a".to_string(),
                },
                Article {
                    title: "No Title".to_string(),
                    doi: "10.1/b".to_string(),
                    url: "https://doi.org/10.1/b".to_string(),
                },
                Article {
                    title: "Untraceable paper".to_string(),
                    doi: "No DOI".to_string(),
                    url: "No URL".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_search_http_error_yields_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = CrossrefClient::new(server.uri());
        assert!(client.search("anything").await.is_empty());
    }

    #[tokio::test]
    async fn test_search_malformed_body_yields_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let client = CrossrefClient::new(server.uri());
        assert!(client.search("anything").await.is_empty());
    }

    #[tokio::test]
    async fn test_search_missing_message_yields_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .mount(&server)
            .await;

        let client = CrossrefClient::new(server.uri());
        assert!(client.search("anything").await.is_empty());
    }

    #[tokio::test]
    async fn test_search_unreachable_yields_empty() {
        // Port 1 is never bound in test environments
        let client = CrossrefClient::new("http://127.0.0.1:1");
        assert!(client.search("anything").await.is_empty());
    }
}
