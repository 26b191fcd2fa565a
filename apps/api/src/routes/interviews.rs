//! Interview session routes: lifecycle transitions plus the live view.
//!
//! All transition endpoints return the resulting session view; invalid
//! transitions surface as 409 via `AppError::Session`.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::machine::SessionView;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    pub draft: String,
}

/// POST /api/v1/interviews/:candidate_id/start
pub async fn handle_start(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.runner.start(candidate_id).await?))
}

/// POST /api/v1/interviews/:candidate_id/answer
pub async fn handle_answer(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(
        state.runner.submit_answer(candidate_id, &req.answer).await?,
    ))
}

/// POST /api/v1/interviews/:candidate_id/draft
/// Buffers in-progress answer text; the timer falls back to it on expiry.
pub async fn handle_draft(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
    Json(req): Json<DraftRequest>,
) -> Result<Json<Value>, AppError> {
    state.runner.buffer_draft(candidate_id, &req.draft).await?;
    Ok(Json(json!({ "buffered": true })))
}

/// POST /api/v1/interviews/:candidate_id/pause
pub async fn handle_pause(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.runner.pause(candidate_id).await?))
}

/// POST /api/v1/interviews/:candidate_id/resume
pub async fn handle_resume(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.runner.resume(candidate_id).await?))
}

/// POST /api/v1/interviews/:candidate_id/end
/// Aborts without scoring.
pub async fn handle_end(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.runner.end(candidate_id).await?))
}

/// GET /api/v1/interviews/:candidate_id/session
pub async fn handle_session(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.runner.view(candidate_id).await?))
}
