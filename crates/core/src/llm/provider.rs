// crates/core/src/llm/provider.rs
//! TextGenerator trait defining the interface for generation services.

use async_trait::async_trait;

use super::types::GenerateError;

/// Trait for text-generation services that produce report sections.
///
/// Implementations include:
/// - `GeminiGenerator`: calls the Gemini REST API
/// - Test doubles that script per-call outcomes
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a single prompt.
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;

    /// Check the service is usable (API key and model present).
    async fn health_check(&self) -> Result<(), GenerateError>;

    /// Provider name for logging/display (e.g. "gemini").
    fn name(&self) -> &str;

    /// Model identifier, if configured.
    fn model(&self) -> Option<&str>;
}
