// crates/core/src/config.rs
//! Generation-service configuration.

use serde::Serialize;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const MODEL_ENV: &str = "GEMINI_MODEL";
pub const BASE_URL_ENV: &str = "GEMINI_BASE_URL";
pub const TIMEOUT_ENV: &str = "GEMINI_TIMEOUT_SECS";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the Gemini text-generation service.
///
/// API key and model are deployment facts with no sensible defaults; both
/// stay `None` until the environment provides them. An unconfigured client
/// reports `NotConfigured` at call time; startup never fails over a
/// missing key.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
    pub generation: GenerationConfig,
}

/// Sampling parameters sent with every generation request.
///
/// Serialized as the `generationConfig` object of the wire request, hence
/// the camelCase field names.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub max_output_tokens: u32,
    pub response_mime_type: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 8192,
            response_mime_type: "text/plain".into(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: None,
            base_url: DEFAULT_BASE_URL.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            generation: GenerationConfig::default(),
        }
    }
}

impl GeminiConfig {
    /// Build a config from the environment. Infallible: unset variables
    /// fall back to defaults (or `None` for key/model), unparseable
    /// timeouts fall back to the default timeout.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()),
            model: std::env::var(MODEL_ENV).ok().filter(|m| !m.is_empty()),
            base_url: std::env::var(BASE_URL_ENV)
                .ok()
                .filter(|u| !u.is_empty())
                .unwrap_or(defaults.base_url),
            timeout_secs: std::env::var(TIMEOUT_ENV)
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            generation: defaults.generation,
        }
    }

    /// True when both the API key and the model name are present.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.model.is_some()
    }
}
