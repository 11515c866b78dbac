// Resume content generation engine.
// Implements: prompt building, marker extraction, normalization, fallback content.
// All generation calls go through llm_client — no direct backend calls here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod extractor;
pub mod fallback;
pub mod handlers;
pub mod normalizer;
pub mod prompts;
pub mod service;

/// Longest summary kept before truncation.
pub const MAX_SUMMARY_WORDS: usize = 60;
/// Most skills returned for one request.
pub const MAX_SKILLS: usize = 10;

/// The two kinds of resume content this service produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Summary,
    Skills,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Summary => "summary",
            ContentKind::Skills => "skills",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "summary" => Ok(ContentKind::Summary),
            "skills" => Ok(ContentKind::Skills),
            other => Err(format!(
                "Unsupported section: {other}. Use 'summary' or 'skills'."
            )),
        }
    }
}

/// Product caps applied during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentLimits {
    pub max_summary_words: usize,
    pub max_skills: usize,
}

impl Default for ContentLimits {
    fn default() -> Self {
        Self {
            max_summary_words: MAX_SUMMARY_WORDS,
            max_skills: MAX_SKILLS,
        }
    }
}
