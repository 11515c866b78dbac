//! Normalizer — turns extracted model text into well-formed resume content.
//!
//! Both entry points are total: any input string produces a value, possibly an
//! empty skill list, which the service replaces with fallback content.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::generation::ContentLimits;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static REPEATED_PERIODS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.{2,}").expect("period pattern is valid"));

/// An item number such as `3.`; items run from one number to the next.
static ITEM_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+\.").expect("item number pattern is valid"));

static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s*").expect("leading number pattern is valid"));

static LEADING_BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[•\-]\s*").expect("leading bullet pattern is valid"));

/// Lowercased openers that already read as first person.
const FIRST_PERSON_OPENERS: &[&str] = &["i ", "i'm", "i've", "i have"];

const TERMINAL_PUNCTUATION: &[char] = &['.', '!', '?'];

const TRAILING_SKILL_PUNCTUATION: &[char] = &['.', ',', ';', ':'];

/// Skills this short carry no information ("Go" is the known casualty).
const MIN_SKILL_CHARS: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Summary
// ────────────────────────────────────────────────────────────────────────────

/// Cleans a generated summary.
///
/// Steps, in order: first-person voice, whitespace collapse, repeated period
/// repair, terminal punctuation, word cap (with a trailing `...`).
pub fn normalize_summary(text: &str, job_title: &str, limits: &ContentLimits) -> String {
    let voiced = ensure_first_person(text.trim(), job_title);
    let collapsed = WHITESPACE_RUN.replace_all(&voiced, " ");
    let mut summary = REPEATED_PERIODS
        .replace_all(collapsed.trim(), ".")
        .into_owned();

    if !summary.ends_with(TERMINAL_PUNCTUATION) {
        summary.push('.');
    }

    let words: Vec<&str> = summary.split_whitespace().collect();
    if words.len() > limits.max_summary_words {
        summary = format!("{}...", words[..limits.max_summary_words].join(" "));
    }

    summary
}

fn ensure_first_person(text: &str, job_title: &str) -> String {
    if text.starts_with("I am") {
        return text.to_string();
    }
    if text.starts_with("a skilled") {
        return format!("I am {text}");
    }

    let lower = text.to_lowercase();
    if FIRST_PERSON_OPENERS.iter().any(|o| lower.starts_with(*o)) {
        text.to_string()
    } else {
        format!("I am a skilled {job_title} with {text}")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// Splits generated text into a deduplicated, capped list of skills.
///
/// Segmentation tries numbered items, then commas, then line breaks, then the
/// whole text. Duplicates are dropped case-insensitively, first one wins.
pub fn normalize_skills(text: &str, limits: &ContentLimits) -> Vec<String> {
    let mut seen = HashSet::new();

    split_candidates(text)
        .into_iter()
        .filter_map(|candidate| clean_skill(&candidate))
        .filter(|skill| seen.insert(skill.to_lowercase()))
        .take(limits.max_skills)
        .collect()
}

fn split_candidates(text: &str) -> Vec<String> {
    let numbered = numbered_items(text);
    if !numbered.is_empty() {
        return numbered;
    }

    if text.contains(',') {
        text.split(',').map(|s| s.trim().to_string()).collect()
    } else if text.contains('\n') {
        text.lines()
            .map(|line| {
                line.trim()
                    .trim_start_matches(|c: char| c == '•' || c == '-' || c == ' ')
                    .to_string()
            })
            .collect()
    } else {
        vec![text.trim().to_string()]
    }
}

/// Returns the non-blank bodies of `N. body` items, in order. A body holding a
/// comma-separated run ("1. Python, SQL, Git") yields one candidate per entry.
fn numbered_items(text: &str) -> Vec<String> {
    let starts: Vec<_> = ITEM_NUMBER.find_iter(text).collect();

    starts
        .iter()
        .enumerate()
        .flat_map(|(i, m)| {
            let end = starts.get(i + 1).map_or(text.len(), |next| next.start());
            text[m.end()..end].split(',')
        })
        .map(str::trim)
        .filter(|body| !body.is_empty())
        .map(str::to_string)
        .collect()
}

fn clean_skill(candidate: &str) -> Option<String> {
    let skill = LEADING_NUMBER.replace(candidate.trim(), "");
    let skill = LEADING_BULLET.replace(&skill, "");
    let skill = skill.trim_end_matches(TRAILING_SKILL_PUNCTUATION).trim();

    (skill.chars().count() >= MIN_SKILL_CHARS).then(|| skill.to_string())
}
