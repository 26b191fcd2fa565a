//! The interview session state machine.
//!
//! `not-started → active ⇄ paused → completed`, with `ended` as the
//! terminal alternate reachable from active/paused. The machine is pure
//! coordination state: it produces the next state plus the persistence
//! effects (`Advance`) for the caller to perform, and performs no I/O
//! itself. Every transition attempted from a state that does not permit it
//! returns an explicit `SessionError`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::interview::scoring;
use crate::interview::summary;
use crate::models::{Answer, PlannedQuestion, Score};

/// Answer text recorded when the timer expires with no draft buffered.
pub const TIME_EXPIRED_ANSWER: &str = "(No answer provided - Time expired)";
/// Answer text recorded for an explicit submission with empty input.
pub const EMPTY_ANSWER: &str = "(No answer provided)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("interview has already been started")]
    AlreadyStarted,
    #[error("no interview is in progress")]
    NotActive,
    #[error("interview is not paused")]
    NotPaused,
    #[error("interview has already completed")]
    AlreadyCompleted,
    #[error("interview has no questions planned")]
    EmptyPlan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionState {
    NotStarted,
    Active,
    Paused,
    Completed,
    /// Explicitly aborted without scoring.
    Ended,
}

/// Score, summary, and timestamp produced exactly once at completion.
#[derive(Debug, Clone)]
pub struct CompletionReport {
    pub score: Score,
    pub summary: String,
    pub completed_at: DateTime<Utc>,
}

/// The effect of an answer being recorded: either the session moved to the
/// next planned question, or the plan is exhausted and the session
/// completed.
#[derive(Debug)]
pub enum Advance {
    NextQuestion {
        answer: Answer,
        next: PlannedQuestion,
    },
    Completed {
        answer: Answer,
        report: CompletionReport,
    },
}

/// Outcome of a one-second timer tick.
#[derive(Debug)]
pub enum Tick {
    /// Still counting down.
    Counting { remaining: u32 },
    /// The timer hit zero and an implicit answer was recorded.
    Expired(Advance),
    /// The session is no longer active (completed, ended, or paused); a
    /// dangling timer firing here must change nothing.
    Ignored,
}

/// Ephemeral per-candidate interview coordination state. Everything here is
/// reconstructible from the candidate record plus the fixed question plan;
/// answers are copied out to the record as soon as they are produced.
#[derive(Debug)]
pub struct InterviewSession {
    candidate_id: Uuid,
    state: SessionState,
    plan: Vec<PlannedQuestion>,
    current_index: usize,
    time_remaining: u32,
    /// Draft answer text buffered while the candidate types; consumed by a
    /// timeout in place of the sentinel.
    answer_buffer: String,
    /// Accumulated this-session answers, used for scoring at completion.
    answers: Vec<Answer>,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

/// Serializable snapshot of session state for API consumers.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub candidate_id: Uuid,
    pub state: SessionState,
    pub current_question_index: usize,
    pub total_questions: usize,
    pub current_question: Option<PlannedQuestion>,
    pub time_remaining: u32,
    pub is_paused: bool,
}

impl InterviewSession {
    pub fn new(candidate_id: Uuid, plan: Vec<PlannedQuestion>) -> Self {
        InterviewSession {
            candidate_id,
            state: SessionState::NotStarted,
            plan,
            current_index: 0,
            time_remaining: 0,
            answer_buffer: String::new(),
            answers: Vec::new(),
            started_at: None,
            ended_at: None,
        }
    }

    pub fn candidate_id(&self) -> Uuid {
        self.candidate_id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn current_question(&self) -> Option<&PlannedQuestion> {
        match self.state {
            SessionState::Active | SessionState::Paused => self.plan.get(self.current_index),
            _ => None,
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            candidate_id: self.candidate_id,
            state: self.state,
            current_question_index: self.current_index,
            total_questions: self.plan.len(),
            current_question: self.current_question().cloned(),
            time_remaining: self.time_remaining,
            is_paused: self.state == SessionState::Paused,
        }
    }

    /// Activates the session on the first planned question.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<&PlannedQuestion, SessionError> {
        match self.state {
            SessionState::NotStarted => {}
            SessionState::Completed => return Err(SessionError::AlreadyCompleted),
            _ => return Err(SessionError::AlreadyStarted),
        }
        let first = self.plan.first().ok_or(SessionError::EmptyPlan)?;
        self.time_remaining = first.time_limit;
        self.current_index = 0;
        self.state = SessionState::Active;
        self.started_at = Some(now);
        Ok(&self.plan[0])
    }

    /// Replaces the buffered draft for the current question.
    pub fn buffer_answer(&mut self, text: &str) -> Result<(), SessionError> {
        if self.state != SessionState::Active {
            return Err(SessionError::NotActive);
        }
        self.answer_buffer = text.to_string();
        Ok(())
    }

    /// One-second countdown step. At zero, synthesizes an answer from the
    /// buffered draft (or the time-expired sentinel) with
    /// `time_taken == time_limit` and advances the plan.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Tick {
        if self.state != SessionState::Active {
            return Tick::Ignored;
        }
        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining > 0 {
            return Tick::Counting {
                remaining: self.time_remaining,
            };
        }

        let question = self.plan[self.current_index].clone();
        let draft = std::mem::take(&mut self.answer_buffer);
        let text = if draft.trim().is_empty() {
            TIME_EXPIRED_ANSWER.to_string()
        } else {
            draft
        };
        let answer = Answer {
            question_id: question.id,
            question_text: question.text,
            difficulty: question.difficulty,
            answer: text,
            time_limit: question.time_limit,
            time_taken: question.time_limit,
            answered_at: now,
        };
        Tick::Expired(self.advance_with(answer, now))
    }

    /// Records an explicit answer for the current question. A submission
    /// racing the timer wins by construction: both paths run under the same
    /// exclusive borrow, and whichever lands second sees the already
    /// advanced state.
    pub fn submit_answer(
        &mut self,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<Advance, SessionError> {
        match self.state {
            SessionState::Active => {}
            SessionState::Completed => return Err(SessionError::AlreadyCompleted),
            _ => return Err(SessionError::NotActive),
        }
        let question = self.plan[self.current_index].clone();
        let trimmed = text.trim();
        let answer_text = if trimmed.is_empty() {
            EMPTY_ANSWER.to_string()
        } else {
            trimmed.to_string()
        };
        let answer = Answer {
            question_id: question.id,
            question_text: question.text,
            difficulty: question.difficulty,
            answer: answer_text,
            // Elapsed time, implicitly capped at the limit by the countdown.
            time_taken: question.time_limit.saturating_sub(self.time_remaining),
            time_limit: question.time_limit,
            answered_at: now,
        };
        self.answer_buffer.clear();
        Ok(self.advance_with(answer, now))
    }

    /// Suspends the countdown, preserving `time_remaining` exactly. The
    /// caller must also stop the timer source.
    pub fn pause(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Active => {
                self.state = SessionState::Paused;
                Ok(())
            }
            SessionState::Completed => Err(SessionError::AlreadyCompleted),
            _ => Err(SessionError::NotActive),
        }
    }

    /// Resumes ticking from the preserved `time_remaining`.
    pub fn resume(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Paused {
            return Err(SessionError::NotPaused);
        }
        self.state = SessionState::Active;
        Ok(())
    }

    /// Explicit abort. Records the end time but never scores; distinct from
    /// normal completion.
    pub fn end(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        match self.state {
            SessionState::Active | SessionState::Paused => {
                self.state = SessionState::Ended;
                self.ended_at = Some(now);
                Ok(())
            }
            SessionState::Completed => Err(SessionError::AlreadyCompleted),
            _ => Err(SessionError::NotActive),
        }
    }

    /// Appends the answer and moves the plan forward. On the final question
    /// the session transitions to completed and the score/summary are
    /// computed here, exactly once: completed sessions reject any further
    /// submission or tick, so no path can reach this twice.
    fn advance_with(&mut self, answer: Answer, now: DateTime<Utc>) -> Advance {
        self.answers.push(answer.clone());

        if self.current_index + 1 >= self.plan.len() {
            self.state = SessionState::Completed;
            self.ended_at = Some(now);
            self.time_remaining = 0;
            let score = scoring::score(&self.answers);
            let summary = summary::summarize(&self.answers, &score);
            return Advance::Completed {
                answer,
                report: CompletionReport {
                    score,
                    summary,
                    completed_at: now,
                },
            };
        }

        self.current_index += 1;
        let next = self.plan[self.current_index].clone();
        self.time_remaining = next.time_limit;
        Advance::NextQuestion { answer, next }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::config::InterviewConfig;
    use crate::models::Difficulty;

    fn default_plan() -> Vec<PlannedQuestion> {
        let config = InterviewConfig::default();
        let mut plan = Vec::new();
        for difficulty in Difficulty::ALL {
            for i in 0..config.questions_for(difficulty) {
                plan.push(PlannedQuestion {
                    id: Uuid::new_v4(),
                    text: format!("{difficulty} question {i}"),
                    difficulty,
                    time_limit: config.time_limit_for(difficulty),
                });
            }
        }
        plan
    }

    fn started_session() -> InterviewSession {
        let mut session = InterviewSession::new(Uuid::new_v4(), default_plan());
        session.start(Utc::now()).unwrap();
        session
    }

    #[test]
    fn test_default_plan_is_six_questions_with_tiered_limits() {
        let plan = default_plan();
        assert_eq!(plan.len(), 6);
        let limits: Vec<u32> = plan.iter().map(|q| q.time_limit).collect();
        assert_eq!(limits, vec![20, 20, 60, 60, 120, 120]);
    }

    #[test]
    fn test_start_sets_first_question_and_timer() {
        let session = started_session();
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.time_remaining(), 20);
        assert_eq!(
            session.current_question().unwrap().difficulty,
            Difficulty::Easy
        );
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let mut session = started_session();
        assert_eq!(
            session.start(Utc::now()).unwrap_err(),
            SessionError::AlreadyStarted
        );
    }

    #[test]
    fn test_start_with_empty_plan_is_rejected() {
        let mut session = InterviewSession::new(Uuid::new_v4(), Vec::new());
        assert_eq!(session.start(Utc::now()).unwrap_err(), SessionError::EmptyPlan);
    }

    #[test]
    fn test_tick_counts_down_by_one() {
        let mut session = started_session();
        match session.tick(Utc::now()) {
            Tick::Counting { remaining } => assert_eq!(remaining, 19),
            other => panic!("expected Counting, got {other:?}"),
        }
        assert_eq!(session.time_remaining(), 19);
    }

    #[test]
    fn test_timeout_synthesizes_sentinel_answer_and_advances() {
        let mut session = started_session();
        let mut expired = None;
        for _ in 0..20 {
            if let Tick::Expired(adv) = session.tick(Utc::now()) {
                expired = Some(adv);
            }
        }
        match expired.expect("timer should expire after 20 ticks") {
            Advance::NextQuestion { answer, next } => {
                assert_eq!(answer.answer, TIME_EXPIRED_ANSWER);
                assert_eq!(answer.time_taken, answer.time_limit);
                assert_eq!(next.difficulty, Difficulty::Easy);
            }
            other => panic!("expected NextQuestion, got {other:?}"),
        }
        assert_eq!(session.time_remaining(), 20);
    }

    #[test]
    fn test_timeout_uses_buffered_draft_when_present() {
        let mut session = started_session();
        session.buffer_answer("half-typed thought").unwrap();
        let mut last = Tick::Ignored;
        for _ in 0..20 {
            last = session.tick(Utc::now());
        }
        match last {
            Tick::Expired(Advance::NextQuestion { answer, .. }) => {
                assert_eq!(answer.answer, "half-typed thought");
            }
            other => panic!("expected expiry, got {other:?}"),
        }
    }

    #[test]
    fn test_submit_records_elapsed_time() {
        let mut session = started_session();
        for _ in 0..5 {
            session.tick(Utc::now());
        }
        match session.submit_answer("an answer", Utc::now()).unwrap() {
            Advance::NextQuestion { answer, .. } => {
                assert_eq!(answer.time_taken, 5);
                assert_eq!(answer.time_limit, 20);
                assert_eq!(answer.answer, "an answer");
            }
            other => panic!("expected NextQuestion, got {other:?}"),
        }
    }

    #[test]
    fn test_submit_empty_text_records_placeholder() {
        let mut session = started_session();
        match session.submit_answer("   ", Utc::now()).unwrap() {
            Advance::NextQuestion { answer, .. } => assert_eq!(answer.answer, EMPTY_ANSWER),
            other => panic!("expected NextQuestion, got {other:?}"),
        }
    }

    #[test]
    fn test_last_answer_completes_and_scores_once() {
        let mut session = started_session();
        let mut completions = 0;
        for i in 0..6 {
            match session.submit_answer(&format!("answer number {i}"), Utc::now()) {
                Ok(Advance::Completed { report, .. }) => {
                    completions += 1;
                    assert!(!report.summary.is_empty());
                    assert!(report.score.breakdown.easy.is_some());
                    assert!(report.score.breakdown.hard.is_some());
                }
                Ok(Advance::NextQuestion { .. }) => {}
                Err(e) => panic!("unexpected error at question {i}: {e}"),
            }
        }
        assert_eq!(completions, 1);
        assert_eq!(session.state(), SessionState::Completed);

        // Redundant submission after completion is rejected, never rescored.
        assert_eq!(
            session.submit_answer("late", Utc::now()).unwrap_err(),
            SessionError::AlreadyCompleted
        );
    }

    #[test]
    fn test_timer_expiry_on_final_question_completes() {
        let mut session = started_session();
        for _ in 0..5 {
            session.submit_answer("answer", Utc::now()).unwrap();
        }
        let mut last = Tick::Ignored;
        for _ in 0..120 {
            last = session.tick(Utc::now());
        }
        match last {
            Tick::Expired(Advance::Completed { answer, .. }) => {
                assert_eq!(answer.answer, TIME_EXPIRED_ANSWER);
            }
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[test]
    fn test_pause_preserves_time_remaining() {
        let mut session = started_session();
        for _ in 0..7 {
            session.tick(Utc::now());
        }
        session.pause().unwrap();
        assert_eq!(session.time_remaining(), 13);

        // Ticks while paused are ignored, not counted.
        assert!(matches!(session.tick(Utc::now()), Tick::Ignored));
        assert_eq!(session.time_remaining(), 13);

        session.resume().unwrap();
        assert_eq!(session.time_remaining(), 13);
    }

    #[test]
    fn test_pause_requires_active() {
        let mut session = InterviewSession::new(Uuid::new_v4(), default_plan());
        assert_eq!(session.pause().unwrap_err(), SessionError::NotActive);
    }

    #[test]
    fn test_resume_requires_paused() {
        let mut session = started_session();
        assert_eq!(session.resume().unwrap_err(), SessionError::NotPaused);
    }

    #[test]
    fn test_end_aborts_without_scoring() {
        let mut session = started_session();
        session.submit_answer("one answer", Utc::now()).unwrap();
        session.end(Utc::now()).unwrap();
        assert_eq!(session.state(), SessionState::Ended);
        // No further transitions are permitted.
        assert_eq!(
            session.submit_answer("more", Utc::now()).unwrap_err(),
            SessionError::NotActive
        );
        assert!(matches!(session.tick(Utc::now()), Tick::Ignored));
    }

    #[test]
    fn test_end_from_paused() {
        let mut session = started_session();
        session.pause().unwrap();
        session.end(Utc::now()).unwrap();
        assert_eq!(session.state(), SessionState::Ended);
    }

    #[test]
    fn test_dangling_tick_after_completion_is_noop() {
        let mut session = started_session();
        for _ in 0..6 {
            session.submit_answer("answer text", Utc::now()).unwrap();
        }
        assert_eq!(session.state(), SessionState::Completed);
        assert!(matches!(session.tick(Utc::now()), Tick::Ignored));
        assert_eq!(session.state(), SessionState::Completed);
    }

    #[test]
    fn test_buffer_cleared_between_questions() {
        let mut session = started_session();
        session.buffer_answer("draft for q1").unwrap();
        session.submit_answer("final for q1", Utc::now()).unwrap();
        // Timeout on q2 must not pick up q1's draft.
        let mut last = Tick::Ignored;
        for _ in 0..20 {
            last = session.tick(Utc::now());
        }
        match last {
            Tick::Expired(Advance::NextQuestion { answer, .. }) => {
                assert_eq!(answer.answer, TIME_EXPIRED_ANSWER);
            }
            other => panic!("expected expiry, got {other:?}"),
        }
    }
}
