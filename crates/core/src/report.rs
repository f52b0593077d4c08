// crates/core/src/report.rs
//! Report document assembly: section texts to a rendered PDF.
//!
//! Assembly is a pure transformation: the same document and style always
//! produce an equivalent PDF. The document is expressed as simple HTML and
//! handed to the layout engine, which owns pagination. The CSS stays
//! minimal; the engine supports a narrow subset.

use std::collections::BTreeMap;

use printpdf::{GeneratePdfOptions, PdfDocument, PdfSaveOptions};
use thiserror::Error;

/// One rendered section: heading plus generated body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionContent {
    pub heading: String,
    pub body: String,
}

/// The assembled report before rendering: a title plus ordered sections.
#[derive(Debug, Clone, Default)]
pub struct ReportDocument {
    pub title: String,
    pub sections: Vec<SectionContent>,
}

/// Page and typography parameters for the rendered document.
#[derive(Debug, Clone)]
pub struct DocumentStyle {
    pub page_margin_pt: u32,
    pub title_size_pt: u32,
    pub heading_size_pt: u32,
    pub body_size_pt: u32,
    pub justify_body: bool,
}

impl Default for DocumentStyle {
    fn default() -> Self {
        Self {
            page_margin_pt: 72,
            title_size_pt: 24,
            heading_size_pt: 16,
            body_size_pt: 12,
            justify_body: true,
        }
    }
}

/// Rendering failures surfaced from the layout engine.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Layout engine error: {0}")]
    Engine(String),
}

impl ReportDocument {
    /// Create an empty document with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Append a section. Sections render in insertion order.
    pub fn push_section(&mut self, heading: impl Into<String>, body: impl Into<String>) {
        self.sections.push(SectionContent {
            heading: heading.into(),
            body: body.into(),
        });
    }

    /// Render the document to PDF bytes.
    pub fn render_pdf(&self, style: &DocumentStyle) -> Result<Vec<u8>, RenderError> {
        let html = self.to_html(style);
        let mut warnings = Vec::new();

        let doc = PdfDocument::from_html(
            &html,
            &BTreeMap::new(), // images
            &BTreeMap::new(), // fonts
            &GeneratePdfOptions::default(),
            &mut warnings,
        )
        .map_err(|e| RenderError::Engine(e.to_string()))?;

        // Serialization is infallible; only parsing can fail above.
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);

        if !warnings.is_empty() {
            tracing::debug!(count = warnings.len(), "Layout engine emitted warnings");
        }

        Ok(bytes)
    }

    /// Build the HTML handed to the layout engine: one title block, then
    /// per section a heading block plus one block per non-empty paragraph
    /// (paragraphs split on blank lines).
    fn to_html(&self, style: &DocumentStyle) -> String {
        let body_align = if style.justify_body { "justify" } else { "left" };

        let mut html = String::new();
        html.push_str("<!DOCTYPE html><html><head><style>");
        html.push_str(&format!(
            "body {{ font-family: sans-serif; font-size: {}pt; margin: {}pt; }} ",
            style.body_size_pt, style.page_margin_pt
        ));
        html.push_str(&format!(
            "h1 {{ font-size: {}pt; text-align: center; }} ",
            style.title_size_pt
        ));
        html.push_str(&format!("h2 {{ font-size: {}pt; }} ", style.heading_size_pt));
        html.push_str(&format!("p {{ text-align: {body_align}; }}"));
        html.push_str("</style></head><body>");

        html.push_str(&format!("<h1>{}</h1>", escape_html(&self.title)));
        for section in &self.sections {
            html.push_str(&format!("<h2>{}</h2>", escape_html(&section.heading)));
            for para in section.body.split("\n\n") {
                let para = para.trim();
                if para.is_empty() {
                    continue;
                }
                html.push_str(&format!("<p>{}</p>", escape_html(para)));
            }
        }

        html.push_str("</body></html>");
        html
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
