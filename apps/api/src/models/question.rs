use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::candidate::Difficulty;

/// A question as supplied by the question bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub text: String,
    pub difficulty: Difficulty,
}

/// A question bound into a session's fixed plan, with the time limit for
/// its tier resolved at session start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedQuestion {
    pub id: Uuid,
    pub text: String,
    pub difficulty: Difficulty,
    /// Seconds allowed for this question.
    pub time_limit: u32,
}

impl PlannedQuestion {
    pub fn from_question(question: Question, time_limit: u32) -> Self {
        PlannedQuestion {
            id: question.id,
            text: question.text,
            difficulty: question.difficulty,
            time_limit,
        }
    }
}
