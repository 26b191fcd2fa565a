use serde::Serialize;

use crate::models::Difficulty;

/// Interview plan configuration: question counts and per-tier time limits.
/// Defaults to 2/2/2 questions at 20/60/120 seconds; every field is
/// overridable through the environment.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewConfig {
    pub easy_questions: usize,
    pub medium_questions: usize,
    pub hard_questions: usize,
    pub easy_time_limit: u32,
    pub medium_time_limit: u32,
    pub hard_time_limit: u32,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        InterviewConfig {
            easy_questions: 2,
            medium_questions: 2,
            hard_questions: 2,
            easy_time_limit: 20,
            medium_time_limit: 60,
            hard_time_limit: 120,
        }
    }
}

impl InterviewConfig {
    /// Defaults overlaid with any `INTERVIEW_*` environment overrides.
    pub fn from_env() -> Self {
        let defaults = InterviewConfig::default();
        InterviewConfig {
            easy_questions: env_or("INTERVIEW_EASY_QUESTIONS", defaults.easy_questions),
            medium_questions: env_or("INTERVIEW_MEDIUM_QUESTIONS", defaults.medium_questions),
            hard_questions: env_or("INTERVIEW_HARD_QUESTIONS", defaults.hard_questions),
            easy_time_limit: env_or("INTERVIEW_EASY_TIME_LIMIT", defaults.easy_time_limit),
            medium_time_limit: env_or("INTERVIEW_MEDIUM_TIME_LIMIT", defaults.medium_time_limit),
            hard_time_limit: env_or("INTERVIEW_HARD_TIME_LIMIT", defaults.hard_time_limit),
        }
    }

    pub fn questions_for(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Easy => self.easy_questions,
            Difficulty::Medium => self.medium_questions,
            Difficulty::Hard => self.hard_questions,
        }
    }

    /// Seconds allowed per question at the given tier.
    pub fn time_limit_for(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy_time_limit,
            Difficulty::Medium => self.medium_time_limit,
            Difficulty::Hard => self.hard_time_limit,
        }
    }

    pub fn total_questions(&self) -> usize {
        self.easy_questions + self.medium_questions + self.hard_questions
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plan_shape() {
        let config = InterviewConfig::default();
        assert_eq!(config.total_questions(), 6);
        assert_eq!(config.time_limit_for(Difficulty::Easy), 20);
        assert_eq!(config.time_limit_for(Difficulty::Medium), 60);
        assert_eq!(config.time_limit_for(Difficulty::Hard), 120);
    }

    #[test]
    fn test_questions_per_tier() {
        let config = InterviewConfig {
            hard_questions: 3,
            ..InterviewConfig::default()
        };
        assert_eq!(config.questions_for(Difficulty::Easy), 2);
        assert_eq!(config.questions_for(Difficulty::Hard), 3);
        assert_eq!(config.total_questions(), 7);
    }
}
