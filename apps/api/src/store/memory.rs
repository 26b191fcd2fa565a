//! In-memory candidate store backed by a `RwLock<HashMap>`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Answer, CandidateRecord, CandidateStatus, ChatMessage, Score};
use crate::store::{CandidateStore, ProfileUpdate, StoreError};

#[derive(Default)]
pub struct InMemoryCandidateStore {
    records: RwLock<HashMap<Uuid, CandidateRecord>>,
}

impl InMemoryCandidateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a closure against a stored record, 404 when absent.
    async fn with_record<T>(
        &self,
        id: Uuid,
        apply: impl FnOnce(&mut CandidateRecord) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut records = self.records.write().await;
        let record = records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        apply(record)
    }
}

#[async_trait]
impl CandidateStore for InMemoryCandidateStore {
    async fn insert(&self, record: CandidateRecord) -> Result<(), StoreError> {
        self.records.write().await.insert(record.id, record);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<CandidateRecord, StoreError> {
        self.records
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn list(&self) -> Result<Vec<CandidateRecord>, StoreError> {
        let mut all: Vec<CandidateRecord> = self.records.read().await.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> Result<CandidateRecord, StoreError> {
        self.with_record(id, |record| {
            if let Some(name) = update.name {
                record.name = name;
            }
            if let Some(email) = update.email {
                record.email = email;
            }
            if let Some(phone) = update.phone {
                record.phone = phone;
            }
            Ok(record.clone())
        })
        .await
    }

    async fn set_status(&self, id: Uuid, status: CandidateStatus) -> Result<(), StoreError> {
        self.with_record(id, |record| {
            if !record.status.can_advance_to(status) {
                return Err(StoreError::InvalidStatus {
                    from: record.status,
                    to: status,
                });
            }
            record.status = status;
            Ok(())
        })
        .await
    }

    async fn mark_interview_started(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.with_record(id, |record| {
            record.interview_started_at = Some(at);
            Ok(())
        })
        .await
    }

    async fn append_chat(&self, id: Uuid, message: ChatMessage) -> Result<(), StoreError> {
        self.with_record(id, |record| {
            record.chat_history.push(message);
            Ok(())
        })
        .await
    }

    async fn append_answer(&self, id: Uuid, answer: Answer) -> Result<(), StoreError> {
        self.with_record(id, |record| {
            record.answers.push(answer);
            Ok(())
        })
        .await
    }

    async fn finalize_interview(
        &self,
        id: Uuid,
        score: Score,
        summary: String,
        completed_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.with_record(id, |record| {
            if record.score.is_some() {
                // Already finalized; keep the first result.
                return Ok(());
            }
            record.score = Some(score);
            record.summary = Some(summary);
            record.interview_completed_at = Some(completed_at);
            record.status = CandidateStatus::Completed;
            Ok(())
        })
        .await
    }
}
