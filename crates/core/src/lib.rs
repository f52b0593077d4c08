// crates/core/src/lib.rs
pub mod cleanup;
pub mod config;
pub mod crossref;
pub mod llm;
pub mod report;
pub mod section;

pub use cleanup::TextCleanup;
pub use config::{GeminiConfig, GenerationConfig};
pub use crossref::{Article, CrossrefClient};
pub use llm::{GeminiGenerator, GenerateError, TextGenerator};
pub use report::{DocumentStyle, RenderError, ReportDocument, SectionContent};
pub use section::ReportSection;
