//! Question-bank collaborator. The session machinery treats whatever a bank
//! returns as an opaque ordered plan.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use uuid::Uuid;

use crate::models::{Difficulty, Question};

#[async_trait]
pub trait QuestionBank: Send + Sync {
    /// Draws up to `count` random questions at the given tier.
    async fn draw(&self, difficulty: Difficulty, count: usize) -> anyhow::Result<Vec<Question>>;
}

const EASY_QUESTIONS: &[&str] = &[
    "What is the difference between let, const, and var in JavaScript?",
    "Explain what a React component is and how it differs from a regular function.",
    "What is the purpose of the useState hook in React?",
    "What is the difference between == and === in JavaScript?",
];

const MEDIUM_QUESTIONS: &[&str] = &[
    "Explain the concept of closures in JavaScript with an example.",
    "What is the Virtual DOM in React and why is it useful?",
    "How do you handle state management in a React application?",
    "Explain the differences between REST and GraphQL APIs.",
];

const HARD_QUESTIONS: &[&str] = &[
    "Implement a debounce function in JavaScript and explain when you would use it.",
    "Explain React's reconciliation process and how keys work in lists.",
    "Design a scalable Node.js application architecture for handling high traffic.",
    "How would you optimize a React application for performance?",
];

/// Fixed built-in bank of full-stack interview questions.
pub struct BuiltinQuestionBank;

#[async_trait]
impl QuestionBank for BuiltinQuestionBank {
    async fn draw(&self, difficulty: Difficulty, count: usize) -> anyhow::Result<Vec<Question>> {
        let pool = match difficulty {
            Difficulty::Easy => EASY_QUESTIONS,
            Difficulty::Medium => MEDIUM_QUESTIONS,
            Difficulty::Hard => HARD_QUESTIONS,
        };
        let mut rng = rand::thread_rng();
        Ok(pool
            .choose_multiple(&mut rng, count)
            .map(|text| Question {
                id: Uuid::new_v4(),
                text: (*text).to_string(),
                difficulty,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_draw_returns_requested_count() {
        let bank = BuiltinQuestionBank;
        let questions = bank.draw(Difficulty::Easy, 2).await.unwrap();
        assert_eq!(questions.len(), 2);
        assert!(questions.iter().all(|q| q.difficulty == Difficulty::Easy));
    }

    #[tokio::test]
    async fn test_draw_caps_at_pool_size() {
        let bank = BuiltinQuestionBank;
        let questions = bank.draw(Difficulty::Hard, 100).await.unwrap();
        assert_eq!(questions.len(), HARD_QUESTIONS.len());
    }

    #[tokio::test]
    async fn test_drawn_questions_are_distinct() {
        let bank = BuiltinQuestionBank;
        let questions = bank.draw(Difficulty::Medium, 4).await.unwrap();
        let mut texts: Vec<&str> = questions.iter().map(|q| q.text.as_str()).collect();
        texts.sort_unstable();
        texts.dedup();
        assert_eq!(texts.len(), 4);
    }
}
