// crates/core/src/section.rs
//! The fixed report-section catalogue.
//!
//! Every analysis job produces the same seven sections in the same order.
//! Sections are generated independently (no section's prompt depends on
//! another section's output), so ordering matters only for presentation
//! in the assembled document.

/// One named unit of the final report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportSection {
    Abstract,
    LiteratureReview,
    DataAnalysis,
    Results,
    ResearchGaps,
    Conclusion,
    References,
}

impl ReportSection {
    /// All sections in presentation order.
    pub const ALL: [ReportSection; 7] = [
        ReportSection::Abstract,
        ReportSection::LiteratureReview,
        ReportSection::DataAnalysis,
        ReportSection::Results,
        ReportSection::ResearchGaps,
        ReportSection::Conclusion,
        ReportSection::References,
    ];

    /// Stable snake_case key, used in logs and failure placeholders.
    pub fn key(&self) -> &'static str {
        match self {
            ReportSection::Abstract => "abstract",
            ReportSection::LiteratureReview => "literature_review",
            ReportSection::DataAnalysis => "data_analysis",
            ReportSection::Results => "results",
            ReportSection::ResearchGaps => "research_gaps",
            ReportSection::Conclusion => "conclusion",
            ReportSection::References => "references",
        }
    }

    /// Heading shown in the assembled document.
    pub fn heading(&self) -> &'static str {
        match self {
            ReportSection::Abstract => "Abstract",
            ReportSection::LiteratureReview => "Literature Review",
            ReportSection::DataAnalysis => "Data Analysis",
            ReportSection::Results => "Results",
            ReportSection::ResearchGaps => "Research Gaps",
            ReportSection::Conclusion => "Conclusion",
            ReportSection::References => "References",
        }
    }

    /// Build the generation prompt for this section, interpolating the
    /// full article-link list (one `- <link>` bullet per line).
    pub fn prompt(&self, article_links: &[String]) -> String {
        let links = format_links(article_links);
        match self {
            ReportSection::Abstract => format!(
                "Given these research articles:\n{links}\n\n\
                 Generate only a comprehensive abstract (250-300 words) that \
                 synthesizes the main findings and implications."
            ),
            ReportSection::LiteratureReview => format!(
                "Based on these articles:\n{links}\n\n\
                 Write only a detailed literature review (800-1000 words) that \
                 critically analyzes and connects the existing research."
            ),
            ReportSection::DataAnalysis => format!(
                "For these articles:\n{links}\n\n\
                 Provide only a thorough data analysis section (600-800 words) that \
                 examines the methodologies and data collection approaches used."
            ),
            ReportSection::Results => format!(
                "Analyzing these articles:\n{links}\n\n\
                 Synthesize the key results and findings (500-700 words) across all papers."
            ),
            ReportSection::ResearchGaps => format!(
                "Considering these articles:\n{links}\n\n\
                 Identify only the research gaps and open questions (400-600 words) \
                 that remain unaddressed across these studies."
            ),
            ReportSection::Conclusion => format!(
                "Based on these articles:\n{links}\n\n\
                 Write only a conclusion (400-500 words) that summarizes the main \
                 insights and suggests future research directions."
            ),
            ReportSection::References => format!(
                "For these articles:\n{links}\n\n\
                 Generate a properly formatted reference list in APA style."
            ),
        }
    }
}

/// Format article links as a bulleted list for prompt interpolation.
pub fn format_links(article_links: &[String]) -> String {
    article_links
        .iter()
        .map(|link| format!("- {link}"))
        .collect::<Vec<_>>()
        .join("\n")
}
