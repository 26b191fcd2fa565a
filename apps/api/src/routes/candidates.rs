//! Candidate intake and profile routes.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::doctext::{self, DocumentKind};
use crate::errors::AppError;
use crate::extraction;
use crate::models::{CandidateRecord, CandidateStatus};
use crate::state::AppState;
use crate::store::ProfileUpdate;

#[derive(Debug, Deserialize)]
pub struct CreateCandidateRequest {
    pub raw_text: String,
}

#[derive(Debug, Serialize)]
pub struct CandidateResponse {
    pub candidate: CandidateRecord,
    /// Contact fields still to collect before the interview can start.
    pub missing_fields: Vec<&'static str>,
}

fn respond(record: CandidateRecord) -> Json<CandidateResponse> {
    let missing_fields = record.missing_fields();
    Json(CandidateResponse {
        candidate: record,
        missing_fields,
    })
}

/// POST /api/v1/candidates
/// Creates a candidate from raw résumé text.
pub async fn handle_create_candidate(
    State(state): State<AppState>,
    Json(req): Json<CreateCandidateRequest>,
) -> Result<Json<CandidateResponse>, AppError> {
    let record = build_candidate(&req.raw_text);
    state.store.insert(record.clone()).await?;
    info!("created candidate {} from raw text", record.id);
    Ok(respond(record))
}

/// POST /api/v1/candidates/resume
/// Creates a candidate from an uploaded résumé document (multipart field
/// `resume`). The document type comes from the part's content type, with
/// the filename extension as fallback.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CandidateResponse>, AppError> {
    let mut document: Option<(DocumentKind, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("resume") {
            continue;
        }
        let kind = field
            .content_type()
            .and_then(DocumentKind::from_mime)
            .or_else(|| kind_from_filename(field.file_name()))
            .ok_or_else(|| {
                AppError::Validation(
                    "unsupported document type; upload a PDF, Word, or plain-text résumé"
                        .to_string(),
                )
            })?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
        document = Some((kind, data));
        break;
    }
    let (kind, data) = document.ok_or_else(|| {
        AppError::Validation("missing 'resume' field in multipart body".to_string())
    })?;

    let text = doctext::extract_text(kind, &data)?;
    let record = build_candidate(&text);
    state.store.insert(record.clone()).await?;
    info!("created candidate {} from uploaded document", record.id);
    Ok(respond(record))
}

/// GET /api/v1/candidates
/// All candidates, newest first.
pub async fn handle_list_candidates(
    State(state): State<AppState>,
) -> Result<Json<Vec<CandidateRecord>>, AppError> {
    Ok(Json(state.store.list().await?))
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CandidateResponse>, AppError> {
    Ok(respond(state.store.get(id).await?))
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// PATCH /api/v1/candidates/:id/profile
/// Fills in contact fields the extractor missed. Each provided value is
/// validated; once nothing is missing a pending candidate becomes
/// ready-for-interview.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<CandidateResponse>, AppError> {
    let mut update = ProfileUpdate::default();
    if let Some(name) = req.name {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation("name must not be empty".to_string()));
        }
        update.name = Some(trimmed.to_string());
    }
    if let Some(email) = req.email {
        if !extraction::is_valid_email(&email) {
            return Err(AppError::Validation(format!(
                "'{}' is not a valid email address",
                email.trim()
            )));
        }
        update.email = Some(email.trim().to_string());
    }
    if let Some(phone) = req.phone {
        let normalized = extraction::normalize_phone(&phone).ok_or_else(|| {
            AppError::Validation(format!("'{}' is not a valid phone number", phone.trim()))
        })?;
        update.phone = Some(normalized);
    }

    let record = state.store.update_profile(id, update).await?;
    let record = if record.status == CandidateStatus::Pending && record.missing_fields().is_empty()
    {
        state
            .store
            .set_status(id, CandidateStatus::ReadyForInterview)
            .await?;
        state.store.get(id).await?
    } else {
        record
    };
    Ok(respond(record))
}

fn build_candidate(raw_text: &str) -> CandidateRecord {
    let mut record = CandidateRecord::from_extracted(extraction::extract(raw_text));
    // A complete extraction skips the profile-collection step entirely.
    if record.missing_fields().is_empty() {
        record.status = CandidateStatus::ReadyForInterview;
    }
    record
}

fn kind_from_filename(name: Option<&str>) -> Option<DocumentKind> {
    let name = name?.to_ascii_lowercase();
    if name.ends_with(".pdf") {
        Some(DocumentKind::Pdf)
    } else if name.ends_with(".docx") {
        Some(DocumentKind::Docx)
    } else if name.ends_with(".doc") {
        Some(DocumentKind::Doc)
    } else if name.ends_with(".txt") {
        Some(DocumentKind::PlainText)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_filename_extension() {
        assert_eq!(
            kind_from_filename(Some("resume.PDF")),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            kind_from_filename(Some("cv.docx")),
            Some(DocumentKind::Docx)
        );
        assert_eq!(kind_from_filename(Some("photo.png")), None);
        assert_eq!(kind_from_filename(None), None);
    }

    #[test]
    fn test_complete_extraction_is_ready_for_interview() {
        let record =
            build_candidate("John Smith\njohn.smith@example.com\n(555) 123-4567\nSkills: React");
        assert_eq!(record.status, CandidateStatus::ReadyForInterview);
        assert!(record.missing_fields().is_empty());
    }

    #[test]
    fn test_partial_extraction_stays_pending() {
        let record = build_candidate("just some text with an email: a@b.com");
        assert_eq!(record.status, CandidateStatus::Pending);
        assert!(record.missing_fields().contains(&"name"));
    }
}
