//! Best-effort résumé field extraction over unstructured document text.
//!
//! This is a heuristic service, not a parser with a grammar: every field is
//! independently optional and `extract` never fails. Anomalous input
//! degrades to absent/empty fields.

mod sections;
mod skills;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

pub use sections::{extract_certifications, extract_education, extract_experience};
pub use skills::extract_skills;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("email regex")
});

/// Optional country code, optional parens and `-`/`.`/space separators
/// around a 10-digit North-American number.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}").expect("phone regex")
});

/// A name token: starts with a letter, then letters or limited punctuation.
static NAME_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z'.,-]*$").expect("name token regex"));

/// Structured fields pulled out of raw résumé text. All best-effort.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractedFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub certifications: Vec<String>,
}

/// Extracts candidate contact data, skills, and section lines from raw
/// document text. Pure function of its input.
pub fn extract(raw_text: &str) -> ExtractedFields {
    let lines: Vec<&str> = raw_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    ExtractedFields {
        name: extract_name(&lines),
        email: extract_email(raw_text),
        phone: extract_phone(raw_text),
        skills: extract_skills(raw_text),
        experience: extract_experience(raw_text),
        education: extract_education(raw_text),
        certifications: extract_certifications(raw_text),
    }
}

/// Scans the first 5 non-empty lines for one that reads like a person's
/// name: 2–4 tokens, each alphabetic with limited punctuation. First
/// qualifying line wins.
fn extract_name(lines: &[&str]) -> Option<String> {
    for line in lines.iter().take(5) {
        let words: Vec<&str> = line.split_whitespace().collect();
        if (2..=4).contains(&words.len()) && words.iter().all(|w| NAME_TOKEN_RE.is_match(w)) {
            return Some((*line).to_string());
        }
    }
    None
}

fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

/// First phone-shaped match, normalized to `(XXX) XXX-XXXX` when it reduces
/// to 10 digits (an 11-digit match drops its leading country `1`). Matches
/// with any other digit count pass through unformatted.
fn extract_phone(text: &str) -> Option<String> {
    let raw = PHONE_RE.find(text)?.as_str();
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    let local = match digits.len() {
        10 => &digits[..],
        11 if digits.starts_with('1') => &digits[1..],
        _ => return Some(raw.to_string()),
    };
    Some(format!(
        "({}) {}-{}",
        &local[..3],
        &local[3..6],
        &local[6..]
    ))
}

/// Full-string email validation for profile updates: the whole trimmed
/// input must be one email-shaped token.
pub fn is_valid_email(value: &str) -> bool {
    let trimmed = value.trim();
    EMAIL_RE
        .find(trimmed)
        .is_some_and(|m| m.as_str() == trimmed)
}

/// Validates and normalizes a user-supplied phone number. The whole trimmed
/// input must be one phone-shaped token; returns it in `(XXX) XXX-XXXX`
/// form.
pub fn normalize_phone(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let matched = PHONE_RE.find(trimmed)?;
    if matched.as_str() != trimmed {
        return None;
    }
    extract_phone(trimmed)
}
