use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::extraction::ExtractedFields;

/// Question difficulty tier. Each tier carries a default time limit and a
/// scoring weight (see `interview::scoring`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Tiers in ascending order — also the order questions are asked in.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// Candidate lifecycle. Transitions are monotonic forward except
/// cancellation, which is reachable from any non-completed status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CandidateStatus {
    Pending,
    ReadyForInterview,
    InProgress,
    Completed,
    Cancelled,
}

impl CandidateStatus {
    fn rank(self) -> u8 {
        match self {
            CandidateStatus::Pending => 0,
            CandidateStatus::ReadyForInterview => 1,
            CandidateStatus::InProgress => 2,
            CandidateStatus::Completed => 3,
            CandidateStatus::Cancelled => 4,
        }
    }

    /// Forward-only status progression. Cancellation is allowed from any
    /// status except completed; a cancelled candidate stays cancelled.
    pub fn can_advance_to(self, to: CandidateStatus) -> bool {
        match (self, to) {
            (CandidateStatus::Cancelled, to) => to == CandidateStatus::Cancelled,
            (from, CandidateStatus::Cancelled) => from != CandidateStatus::Completed,
            (from, to) => to.rank() >= from.rank(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Bot,
}

/// A single line of the candidate/bot chat transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub kind: MessageKind,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        ChatMessage {
            kind: MessageKind::User,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        ChatMessage {
            kind: MessageKind::Bot,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A candidate's answer to one interview question.
///
/// `question_text` is a snapshot of the wording at answer time, independent
/// of later edits to the question bank. `time_taken == time_limit` marks a
/// time-expired answer by convention; neither direction is enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: Uuid,
    pub question_text: String,
    pub difficulty: Difficulty,
    pub answer: String,
    pub time_limit: u32,
    pub time_taken: u32,
    pub answered_at: DateTime<Utc>,
}

/// Per-difficulty score breakdown. `None` means "no answers at that tier",
/// which is distinct from a scored zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub easy: Option<u8>,
    pub medium: Option<u8>,
    pub hard: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// 0–100 composite across all answers.
    pub overall: u8,
    pub breakdown: ScoreBreakdown,
}

/// The durable candidate aggregate. Owned by the persistence collaborator;
/// the session machine only ever appends to `answers`/`chat_history` and
/// sets `score`/`summary` once, at completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub certifications: Vec<String>,
    pub chat_history: Vec<ChatMessage>,
    pub answers: Vec<Answer>,
    pub status: CandidateStatus,
    pub score: Option<Score>,
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
    pub interview_started_at: Option<DateTime<Utc>>,
    pub interview_completed_at: Option<DateTime<Utc>>,
}

impl CandidateRecord {
    /// Builds a fresh record from best-effort résumé extraction. Absent
    /// fields default to empty and are collected later via the profile
    /// endpoint.
    pub fn from_extracted(fields: ExtractedFields) -> Self {
        CandidateRecord {
            id: Uuid::new_v4(),
            name: fields.name.unwrap_or_default(),
            email: fields.email.unwrap_or_default(),
            phone: fields.phone.unwrap_or_default(),
            skills: fields.skills,
            experience: fields.experience,
            education: fields.education,
            certifications: fields.certifications,
            chat_history: Vec::new(),
            answers: Vec::new(),
            status: CandidateStatus::Pending,
            score: None,
            summary: None,
            created_at: Utc::now(),
            interview_started_at: None,
            interview_completed_at: None,
        }
    }

    /// Required contact fields still missing after extraction.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.phone.trim().is_empty() {
            missing.push("phone");
        }
        missing
    }
}
