pub mod candidates;
pub mod health;
pub mod interviews;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Candidate intake
        .route(
            "/api/v1/candidates",
            post(candidates::handle_create_candidate).get(candidates::handle_list_candidates),
        )
        .route(
            "/api/v1/candidates/resume",
            post(candidates::handle_upload_resume),
        )
        .route("/api/v1/candidates/:id", get(candidates::handle_get_candidate))
        .route(
            "/api/v1/candidates/:id/profile",
            patch(candidates::handle_update_profile),
        )
        // Interview lifecycle
        .route(
            "/api/v1/interviews/:candidate_id/start",
            post(interviews::handle_start),
        )
        .route(
            "/api/v1/interviews/:candidate_id/answer",
            post(interviews::handle_answer),
        )
        .route(
            "/api/v1/interviews/:candidate_id/draft",
            post(interviews::handle_draft),
        )
        .route(
            "/api/v1/interviews/:candidate_id/pause",
            post(interviews::handle_pause),
        )
        .route(
            "/api/v1/interviews/:candidate_id/resume",
            post(interviews::handle_resume),
        )
        .route(
            "/api/v1/interviews/:candidate_id/end",
            post(interviews::handle_end),
        )
        .route(
            "/api/v1/interviews/:candidate_id/session",
            get(interviews::handle_session),
        )
        .with_state(state)
}
