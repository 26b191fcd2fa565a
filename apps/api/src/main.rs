mod config;
mod doctext;
mod errors;
mod extraction;
mod interview;
mod models;
mod questions;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::interview::SessionRunner;
use crate::questions::BuiltinQuestionBank;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{CandidateStore, InMemoryCandidateStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview API v{}", env!("CARGO_PKG_VERSION"));

    // Candidate persistence (in-memory for now; the store is a trait seam)
    let store: Arc<dyn CandidateStore> = Arc::new(InMemoryCandidateStore::new());

    // Interview engine: built-in question bank plus the timer-driven runner
    let runner = Arc::new(SessionRunner::new(
        Arc::clone(&store),
        Arc::new(BuiltinQuestionBank),
        config.interview.clone(),
    ));
    info!(
        "Interview plan: {} questions per session",
        config.interview.total_questions()
    );

    let state = AppState {
        store,
        runner,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
