use std::sync::Arc;

use crate::config::Config;
use crate::interview::SessionRunner;
use crate::store::CandidateStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable candidate persistence. Default: in-memory.
    pub store: Arc<dyn CandidateStore>,
    pub runner: Arc<SessionRunner>,
    pub config: Config,
}
