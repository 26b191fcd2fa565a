use anyhow::{Context, Result};

use crate::interview::InterviewConfig;

/// Application configuration loaded from environment variables. Everything
/// has a sensible default; the service starts with no environment at all.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub interview: InterviewConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            interview: InterviewConfig::from_env(),
        })
    }
}
