//! Templated natural-language assessment of a completed interview.

use crate::models::{Answer, Score};

/// Threshold below which an easy/medium tier triggers a remedial note.
const WEAK_TIER_THRESHOLD: u8 = 50;
/// Threshold at or above which the hard tier triggers a strength note.
const STRONG_HARD_THRESHOLD: u8 = 70;

/// Builds the assessment string: answered count, numeric score, a tiered
/// qualitative sentence, and independent per-difficulty notes. All note
/// conditions are evaluated separately and any subset of them may fire.
/// Pure function.
pub fn summarize(answers: &[Answer], score: &Score) -> String {
    let total = answers.len();
    let answered = answers
        .iter()
        .filter(|a| !a.answer.trim().is_empty())
        .count();

    let mut summary = format!(
        "Candidate completed {answered}/{total} questions with a score of {}/100. ",
        score.overall
    );
    summary.push_str(tier_statement(score.overall));

    if score.breakdown.easy.is_some_and(|s| s < WEAK_TIER_THRESHOLD) {
        summary.push_str(" Struggles with fundamental concepts.");
    }
    if score
        .breakdown
        .medium
        .is_some_and(|s| s < WEAK_TIER_THRESHOLD)
    {
        summary.push_str(" Needs improvement in intermediate-level topics.");
    }
    if score
        .breakdown
        .hard
        .is_some_and(|s| s >= STRONG_HARD_THRESHOLD)
    {
        summary.push_str(" Shows strong problem-solving abilities in complex scenarios.");
    }

    summary
}

/// Qualitative sentence for the overall score. Bucket lower bounds are
/// inclusive.
fn tier_statement(overall: u8) -> &'static str {
    if overall >= 80 {
        "Excellent performance with comprehensive answers demonstrating strong technical knowledge."
    } else if overall >= 60 {
        "Good performance with solid understanding of most concepts."
    } else if overall >= 40 {
        "Average performance with some areas needing improvement."
    } else {
        "Below average performance. Candidate may need additional preparation or training."
    }
}
