// crates/core/src/llm/gemini.rs
//! Gemini REST provider: calls the `generateContent` endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{GeminiConfig, GenerationConfig, API_KEY_ENV, MODEL_ENV};

use super::provider::TextGenerator;
use super::types::GenerateError;

/// Text generator backed by the Gemini `generateContent` REST API.
///
/// One call per section prompt; sampling parameters come from
/// [`GeminiConfig::generation`] and ride along on every request.
pub struct GeminiGenerator {
    config: GeminiConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: &'a GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiGenerator {
    /// Create a generator from a config. The underlying HTTP client is
    /// built once and reused across all section calls.
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Resolve key + model, or report which variable is missing.
    fn credentials(&self) -> Result<(&str, &str), GenerateError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| GenerateError::NotConfigured(format!("{API_KEY_ENV} is not set")))?;
        let model = self
            .config
            .model
            .as_deref()
            .ok_or_else(|| GenerateError::NotConfigured(format!("{MODEL_ENV} is not set")))?;
        Ok((api_key, model))
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let (api_key, model) = self.credentials()?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, model
        );

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: &self.config.generation,
        };

        let t0 = std::time::Instant::now();
        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .timeout(std::time::Duration::from_secs(self.config.timeout_secs))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerateError::Timeout(self.config.timeout_secs)
                } else {
                    GenerateError::Http(e.to_string())
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Gemini request failed");
            return Err(GenerateError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let data: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| GenerateError::ParseFailed(e.to_string()))?;

        let text: String = data
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(GenerateError::EmptyResponse);
        }

        tracing::debug!(
            model = %model,
            chars = text.len(),
            latency_ms = t0.elapsed().as_millis() as u64,
            "Generation complete"
        );
        Ok(text)
    }

    async fn health_check(&self) -> Result<(), GenerateError> {
        self.credentials().map(|_| ())
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> Option<&str> {
        self.config.model.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String) -> GeminiConfig {
        GeminiConfig {
            api_key: Some("test-key".into()),
            model: Some("test-model".into()),
            base_url,
            timeout_secs: 5,
            generation: GenerationConfig::default(),
        }
    }

    #[tokio::test]
    async fn test_generate_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/test-model:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{"parts": [{"text": "write an abstract"}]}],
                "generationConfig": {"temperature": 1.0, "topK": 40}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {"parts": [{"text": "Generated "}, {"text": "abstract."}]}
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let generator = GeminiGenerator::new(test_config(server.uri()));
        let text = generator.generate("write an abstract").await.unwrap();
        assert_eq!(text, "Generated abstract.");
    }

    #[tokio::test]
    async fn test_generate_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let generator = GeminiGenerator::new(test_config(server.uri()));
        let err = generator.generate("prompt").await.unwrap_err();
        match err {
            GenerateError::Api { status, body } => {
                assert_eq!(status, 429);
                assert!(body.contains("quota exceeded"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_empty_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .mount(&server)
            .await;

        let generator = GeminiGenerator::new(test_config(server.uri()));
        let err = generator.generate("prompt").await.unwrap_err();
        assert!(matches!(err, GenerateError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_generate_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let generator = GeminiGenerator::new(test_config(server.uri()));
        let err = generator.generate("prompt").await.unwrap_err();
        assert!(matches!(err, GenerateError::ParseFailed(_)));
    }

    #[tokio::test]
    async fn test_unconfigured_fails_without_network() {
        let generator = GeminiGenerator::new(GeminiConfig::default());
        let err = generator.generate("prompt").await.unwrap_err();
        match err {
            GenerateError::NotConfigured(msg) => assert!(msg.contains(API_KEY_ENV)),
            other => panic!("expected NotConfigured, got {other:?}"),
        }

        assert!(generator.health_check().await.is_err());
    }

    #[tokio::test]
    async fn test_health_check_passes_when_configured() {
        let generator = GeminiGenerator::new(test_config("http://unused".into()));
        assert!(generator.health_check().await.is_ok());
        assert_eq!(generator.name(), "gemini");
        assert_eq!(generator.model(), Some("test-model"));
    }
}
