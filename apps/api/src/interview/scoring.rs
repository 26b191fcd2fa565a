//! Heuristic answer scoring — length- and pacing-based, deterministic, and
//! side-effect free. Identical answer sets always produce identical scores.

use crate::models::{Answer, Difficulty, Score, ScoreBreakdown};

/// Maximum raw points a single question can earn, by tier.
pub fn max_question_points(difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Easy => 10.0,
        Difficulty::Medium => 20.0,
        Difficulty::Hard => 30.0,
    }
}

/// Scores a full answer set: 0–100 overall plus a per-difficulty breakdown.
/// A tier with no answers is reported as `None`, distinct from a scored
/// zero.
pub fn score(answers: &[Answer]) -> Score {
    Score {
        overall: overall_score(answers),
        breakdown: ScoreBreakdown {
            easy: subset_score(answers, Difficulty::Easy),
            medium: subset_score(answers, Difficulty::Medium),
            hard: subset_score(answers, Difficulty::Hard),
        },
    }
}

fn overall_score(answers: &[Answer]) -> u8 {
    if answers.is_empty() {
        return 0;
    }
    let mut earned_total = 0.0;
    let mut max_total = 0.0;
    for answer in answers {
        let max = max_question_points(answer.difficulty);
        earned_total += earned_points(answer, max);
        max_total += max;
    }
    ((earned_total / max_total) * 100.0).round() as u8
}

fn subset_score(answers: &[Answer], difficulty: Difficulty) -> Option<u8> {
    let subset: Vec<Answer> = answers
        .iter()
        .filter(|a| a.difficulty == difficulty)
        .cloned()
        .collect();
    if subset.is_empty() {
        None
    } else {
        Some(overall_score(&subset))
    }
}

/// Base fraction of the max by word count, then a pacing adjustment: a fast
/// but substantial answer (under 30% of the limit, more than 5 words) earns
/// a 1.1x bonus; an answer that used over 90% of the limit is cut to 0.8x.
/// The result never exceeds the per-question max.
fn earned_points(answer: &Answer, max: f64) -> f64 {
    let words = word_count(&answer.answer);
    let base_fraction = match words {
        0 => 0.0,
        1..=4 => 0.2,
        5..=14 => 0.5,
        15..=29 => 0.7,
        _ => 0.9,
    };
    let mut earned = max * base_fraction;

    let time_ratio = if answer.time_limit == 0 {
        1.0
    } else {
        f64::from(answer.time_taken) / f64::from(answer.time_limit)
    };
    if time_ratio < 0.3 && words > 5 {
        earned *= 1.1;
    } else if time_ratio > 0.9 {
        earned *= 0.8;
    }

    earned.min(max)
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
