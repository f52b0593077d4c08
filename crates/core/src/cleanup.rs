// crates/core/src/cleanup.rs
//! Line-level cleanup of generated section text.
//!
//! The generation service sometimes wraps real content in conversational
//! filler ("Okay, here is the abstract you asked for:", trailing
//! "I hope this helps!"). Those lines carry no report content, so they are
//! dropped before assembly. Matching is plain substring per line and the
//! marker list is configuration, not code.

/// Env var holding a comma-separated override of the marker list.
pub const FILLER_MARKERS_ENV: &str = "METASYNTH_FILLER_MARKERS";

/// Lead-ins and sign-offs observed from the generation service.
const DEFAULT_MARKERS: &[&str] = &[
    "Okay, here",
    "Okay, I will",
    "Sure, here",
    "Certainly! Here",
    "Here is the requested",
    "I hope this helps",
    "Let me know if",
    "As an AI language model",
];

/// Drops lines containing any configured filler marker.
#[derive(Debug, Clone)]
pub struct TextCleanup {
    markers: Vec<String>,
}

impl Default for TextCleanup {
    fn default() -> Self {
        Self {
            markers: DEFAULT_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl TextCleanup {
    /// Create a cleanup pass with an explicit marker list.
    pub fn new(markers: Vec<String>) -> Self {
        Self { markers }
    }

    /// Read the marker list from [`FILLER_MARKERS_ENV`] (comma-separated),
    /// falling back to the default list when unset or empty.
    pub fn from_env() -> Self {
        match std::env::var(FILLER_MARKERS_ENV) {
            Ok(raw) => {
                let markers: Vec<String> = raw
                    .split(',')
                    .map(|m| m.trim().to_string())
                    .filter(|m| !m.is_empty())
                    .collect();
                if markers.is_empty() {
                    Self::default()
                } else {
                    Self::new(markers)
                }
            }
            Err(_) => Self::default(),
        }
    }

    /// Remove every line containing a marker. Kept lines are preserved
    /// verbatim, including blank lines (paragraph boundaries).
    pub fn clean(&self, text: &str) -> String {
        text.lines()
            .filter(|line| !self.markers.iter().any(|m| line.contains(m.as_str())))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
