// crates/core/src/llm/types.rs
//! Error types for text generation.

use thiserror::Error;

/// Errors that can occur during a generation call.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Generation service not configured: {0}")]
    NotConfigured(String),

    #[error("Request failed: {0}")]
    Http(String),

    #[error("Service returned error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    ParseFailed(String),

    #[error("Service returned no text candidates")]
    EmptyResponse,

    #[error("Timeout after {0} seconds")]
    Timeout(u64),
}
