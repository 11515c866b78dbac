//! Extractor — pulls the section of interest out of raw model output.
//!
//! Backends differ: some echo the prompt, some truncate mid-sentence, some drop
//! the marker entirely. Extraction degrades in a fixed order and never fails:
//! 1. marker-anchored pattern
//! 2. text after the first literal marker
//! 3. text after the echoed prompt
//! 4. the whole output, trimmed

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::generation::prompts::marker;
use crate::generation::ContentKind;

/// Summary runs to an explicit end marker or the end of the text.
static SUMMARY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)SUMMARY:\s*(.*?)(?:ENDMARKER|\z)").expect("summary pattern is valid")
});

/// Skills run to the first blank line or the end of the text.
static SKILLS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)SKILLS:\s*(.*?)(?:\n\n|\z)").expect("skills pattern is valid")
});

fn pattern(kind: ContentKind) -> &'static Regex {
    match kind {
        ContentKind::Summary => &SUMMARY_PATTERN,
        ContentKind::Skills => &SKILLS_PATTERN,
    }
}

/// Returns the trimmed span for `kind` found in `raw`. May be empty.
///
/// `prompt` is the exact prompt sent to the backend; it is only used when the
/// marker is missing from the output.
pub fn extract(raw: &str, kind: ContentKind, prompt: &str) -> String {
    if let Some(captured) = pattern(kind).captures(raw).and_then(|c| c.get(1)) {
        return captured.as_str().trim().to_string();
    }
    debug!("No {kind} pattern match, falling back to marker split");

    // Unreachable with the current patterns: they match whenever the marker is
    // present. Kept so a stricter pattern still degrades in the same order.
    if let Some((_, after)) = raw.split_once(marker(kind)) {
        return after.trim().to_string();
    }
    debug!("No {kind} marker in output, falling back to prompt removal");

    if !prompt.is_empty() {
        if let Some(rest) = raw.strip_prefix(prompt) {
            return rest.trim().to_string();
        }
    }
    debug!("Prompt not echoed, using raw {kind} output");

    raw.trim().to_string()
}
