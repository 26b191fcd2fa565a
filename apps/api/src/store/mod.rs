//! Persistence collaborator for candidate records: update-if-exists
//! semantics, append-only chat and answer writers, and a once-only
//! interview finalizer. The core session machinery talks to this trait
//! only; the in-memory implementation backs the service and the tests.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Answer, CandidateRecord, CandidateStatus, ChatMessage, Score};

pub use memory::InMemoryCandidateStore;

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("candidate {0} not found")]
    NotFound(Uuid),
    #[error("status cannot move from {from:?} to {to:?}")]
    InvalidStatus {
        from: CandidateStatus,
        to: CandidateStatus,
    },
}

/// Partial profile update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[async_trait]
pub trait CandidateStore: Send + Sync {
    async fn insert(&self, record: CandidateRecord) -> Result<(), StoreError>;

    async fn get(&self, id: Uuid) -> Result<CandidateRecord, StoreError>;

    async fn list(&self) -> Result<Vec<CandidateRecord>, StoreError>;

    /// Overwrites the provided contact fields; 404 if the record is absent.
    async fn update_profile(
        &self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> Result<CandidateRecord, StoreError>;

    /// Forward-only status change (see `CandidateStatus::can_advance_to`).
    async fn set_status(&self, id: Uuid, status: CandidateStatus) -> Result<(), StoreError>;

    async fn mark_interview_started(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    async fn append_chat(&self, id: Uuid, message: ChatMessage) -> Result<(), StoreError>;

    async fn append_answer(&self, id: Uuid, answer: Answer) -> Result<(), StoreError>;

    /// Sets score, summary, completion timestamp, and the completed status.
    /// Idempotent: a record that already carries a score is left untouched,
    /// so an at-least-once caller cannot overwrite the first result.
    async fn finalize_interview(
        &self,
        id: Uuid,
        score: Score,
        summary: String,
        completed_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;
}
