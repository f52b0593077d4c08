// crates/core/src/llm/mod.rs
//! Text-generation module for report sections.
//!
//! Provides the `TextGenerator` trait and the Gemini REST implementation
//! used to generate each report section from a prompt.

pub mod gemini;
pub mod provider;
pub mod types;

pub use gemini::GeminiGenerator;
pub use provider::TextGenerator;
pub use types::GenerateError;
