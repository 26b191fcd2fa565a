//! Timer-driven session coordination.
//!
//! One tokio task per active session drives the 1-second countdown; every
//! state transition for a session goes through that session's `Mutex`, so
//! no two ticks (or a tick and a submission) can interleave. Pausing aborts
//! the timer task outright rather than skipping ticks, and a timer that
//! fires after completion hits the machine's state guard and stops itself.
//! Sessions for different candidates share nothing and run fully in
//! parallel.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::config::InterviewConfig;
use crate::interview::machine::{
    Advance, InterviewSession, SessionError, SessionState, SessionView, Tick,
};
use crate::models::{CandidateStatus, ChatMessage, Difficulty, PlannedQuestion};
use crate::questions::QuestionBank;
use crate::store::CandidateStore;

struct SessionEntry {
    session: Mutex<InterviewSession>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

/// Owns all live interview sessions and their countdown timers.
pub struct SessionRunner {
    sessions: RwLock<HashMap<Uuid, Arc<SessionEntry>>>,
    store: Arc<dyn CandidateStore>,
    bank: Arc<dyn QuestionBank>,
    config: InterviewConfig,
}

impl SessionRunner {
    pub fn new(
        store: Arc<dyn CandidateStore>,
        bank: Arc<dyn QuestionBank>,
        config: InterviewConfig,
    ) -> Self {
        SessionRunner {
            sessions: RwLock::new(HashMap::new()),
            store,
            bank,
            config,
        }
    }

    /// Starts an interview for the candidate: draws the question plan,
    /// activates the machine, persists the status change and the first
    /// question prompt, and spawns the countdown timer.
    pub async fn start(&self, candidate_id: Uuid) -> Result<SessionView, AppError> {
        // The candidate must exist before anything is planned.
        self.store.get(candidate_id).await?;

        let plan = self.build_plan().await?;
        let mut session = InterviewSession::new(candidate_id, plan);
        let now = Utc::now();
        let first = session.start(now)?.clone();
        let view = session.view();
        let entry = Arc::new(SessionEntry {
            session: Mutex::new(session),
            timer: Mutex::new(None),
        });

        // The already-started check and the insert must be one atomic step
        // under the write lock, or two racing starts both pass the check
        // and the loser's timer keeps ticking an orphaned session.
        {
            let mut sessions = self.sessions.write().await;
            if let Some(existing) = sessions.get(&candidate_id) {
                match existing.session.lock().await.state() {
                    SessionState::Active | SessionState::Paused => {
                        return Err(SessionError::AlreadyStarted.into())
                    }
                    SessionState::Completed => {
                        return Err(SessionError::AlreadyCompleted.into())
                    }
                    SessionState::NotStarted | SessionState::Ended => {
                        cancel_timer(existing).await;
                    }
                }
            }
            sessions.insert(candidate_id, Arc::clone(&entry));
        }

        // Store side effects run only for the start that claimed the slot.
        if let Err(e) = self
            .persist_start(candidate_id, now, &first, view.total_questions)
            .await
        {
            self.sessions.write().await.remove(&candidate_id);
            return Err(e);
        }

        self.spawn_timer(candidate_id, &entry).await;
        info!("interview started for candidate {candidate_id}");
        Ok(view)
    }

    async fn persist_start(
        &self,
        candidate_id: Uuid,
        now: chrono::DateTime<Utc>,
        first: &PlannedQuestion,
        total: usize,
    ) -> Result<(), AppError> {
        self.store
            .set_status(candidate_id, CandidateStatus::InProgress)
            .await?;
        self.store.mark_interview_started(candidate_id, now).await?;
        self.store
            .append_chat(
                candidate_id,
                ChatMessage::bot(question_prompt(1, total, first)),
            )
            .await?;
        Ok(())
    }

    /// Records an explicit answer. A submission racing a timer expiry wins:
    /// both serialize on the session lock, and a tick landing second finds
    /// the machine already advanced.
    pub async fn submit_answer(
        &self,
        candidate_id: Uuid,
        text: &str,
    ) -> Result<SessionView, AppError> {
        let entry = self.entry(candidate_id).await?;

        let (advance, view) = {
            let mut session = entry.session.lock().await;
            let advance = session.submit_answer(text, Utc::now())?;
            // Cancelled under the session lock so the old cadence cannot
            // steal part of the next question's first second; respawned
            // below once the advance is persisted.
            cancel_timer(&entry).await;
            (advance, session.view())
        };

        // Transcript is written only once the machine accepts the
        // submission; a rejected transition leaves the record untouched.
        self.store
            .append_chat(candidate_id, ChatMessage::user(text))
            .await?;

        let completed = persist_advance(
            &self.store,
            candidate_id,
            advance,
            false,
            view.current_question_index + 1,
            view.total_questions,
        )
        .await?;
        if !completed {
            self.spawn_timer(candidate_id, &entry).await;
        }
        Ok(view)
    }

    /// Replaces the draft answer the timer will fall back to on expiry.
    pub async fn buffer_draft(&self, candidate_id: Uuid, text: &str) -> Result<(), AppError> {
        let entry = self.entry(candidate_id).await?;
        entry.session.lock().await.buffer_answer(text)?;
        Ok(())
    }

    /// Suspends the countdown and stops the timer source.
    pub async fn pause(&self, candidate_id: Uuid) -> Result<SessionView, AppError> {
        let entry = self.entry(candidate_id).await?;
        let view = {
            let mut session = entry.session.lock().await;
            session.pause()?;
            session.view()
        };
        cancel_timer(&entry).await;
        info!("interview paused for candidate {candidate_id}");
        Ok(view)
    }

    /// Restarts ticking from the preserved remaining time.
    pub async fn resume(&self, candidate_id: Uuid) -> Result<SessionView, AppError> {
        let entry = self.entry(candidate_id).await?;
        let view = {
            let mut session = entry.session.lock().await;
            session.resume()?;
            session.view()
        };
        self.spawn_timer(candidate_id, &entry).await;
        info!("interview resumed for candidate {candidate_id}");
        Ok(view)
    }

    /// Explicit abort: cancels the timer and marks the candidate
    /// cancelled. Never scores.
    pub async fn end(&self, candidate_id: Uuid) -> Result<SessionView, AppError> {
        let entry = self.entry(candidate_id).await?;
        let view = {
            let mut session = entry.session.lock().await;
            session.end(Utc::now())?;
            session.view()
        };
        cancel_timer(&entry).await;
        self.store
            .set_status(candidate_id, CandidateStatus::Cancelled)
            .await?;
        info!("interview ended early for candidate {candidate_id}");
        Ok(view)
    }

    pub async fn view(&self, candidate_id: Uuid) -> Result<SessionView, AppError> {
        let entry = self.entry(candidate_id).await?;
        let session = entry.session.lock().await;
        Ok(session.view())
    }

    async fn entry(&self, candidate_id: Uuid) -> Result<Arc<SessionEntry>, AppError> {
        self.sessions
            .read()
            .await
            .get(&candidate_id)
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(format!("no interview session for candidate {candidate_id}"))
            })
    }

    /// Draws the tiered question plan in ascending difficulty order.
    async fn build_plan(&self) -> Result<Vec<PlannedQuestion>, AppError> {
        let mut plan = Vec::with_capacity(self.config.total_questions());
        for difficulty in Difficulty::ALL {
            let count = self.config.questions_for(difficulty);
            if count == 0 {
                continue;
            }
            let questions = self.bank.draw(difficulty, count).await?;
            let limit = self.config.time_limit_for(difficulty);
            plan.extend(
                questions
                    .into_iter()
                    .map(|q| PlannedQuestion::from_question(q, limit)),
            );
        }
        Ok(plan)
    }

    async fn spawn_timer(&self, candidate_id: Uuid, entry: &Arc<SessionEntry>) {
        let store = Arc::clone(&self.store);
        let task_entry = Arc::clone(entry);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first interval tick completes immediately; consume it so
            // the countdown starts a full second from now.
            interval.tick().await;
            loop {
                interval.tick().await;
                let (outcome, number, total) = {
                    let mut session = task_entry.session.lock().await;
                    let outcome = session.tick(Utc::now());
                    let view = session.view();
                    (outcome, view.current_question_index + 1, view.total_questions)
                };
                match outcome {
                    Tick::Counting { .. } => {}
                    Tick::Expired(advance) => {
                        match persist_advance(&store, candidate_id, advance, true, number, total)
                            .await
                        {
                            Ok(true) => break,
                            Ok(false) => {}
                            Err(e) => {
                                // Persistence is retryable by the layer
                                // above; the in-memory state already moved.
                                error!(
                                    "failed to persist timer transition for {candidate_id}: {e}"
                                );
                            }
                        }
                    }
                    Tick::Ignored => break,
                }
            }
        });
        *entry.timer.lock().await = Some(handle);
    }
}

async fn cancel_timer(entry: &SessionEntry) {
    if let Some(handle) = entry.timer.lock().await.take() {
        handle.abort();
    }
}

/// Applies the persistence effects of an `Advance`: the appended answer,
/// the transcript lines, and, at completion, the finalized score and
/// summary. Returns true when the session completed.
async fn persist_advance(
    store: &Arc<dyn CandidateStore>,
    candidate_id: Uuid,
    advance: Advance,
    time_expired: bool,
    question_number: usize,
    total: usize,
) -> Result<bool, AppError> {
    match advance {
        Advance::NextQuestion { answer, next } => {
            store.append_answer(candidate_id, answer).await?;
            if time_expired {
                store
                    .append_chat(
                        candidate_id,
                        ChatMessage::bot("Time's up! Moving on to the next question."),
                    )
                    .await?;
            }
            store
                .append_chat(
                    candidate_id,
                    ChatMessage::bot(question_prompt(question_number, total, &next)),
                )
                .await?;
            Ok(false)
        }
        Advance::Completed { answer, report } => {
            store.append_answer(candidate_id, answer).await?;
            let message = format!(
                "Interview complete! Final score: {}/100. {}",
                report.score.overall, report.summary
            );
            store
                .finalize_interview(
                    candidate_id,
                    report.score,
                    report.summary,
                    report.completed_at,
                )
                .await?;
            store
                .append_chat(candidate_id, ChatMessage::bot(message))
                .await?;
            Ok(true)
        }
    }
}

fn question_prompt(number: usize, total: usize, question: &PlannedQuestion) -> String {
    format!(
        "Question {number}/{total} ({} - {} seconds): {}",
        question.difficulty, question.time_limit, question.text
    )
}
