use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_MODEL;

const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Entries are kept in memory when unset.
    pub database_url: Option<String>,
    pub anthropic_api_key: String,
    pub claude_model: String,
    pub port: u16,
    pub rust_log: String,
    /// How long an untouched composer session survives.
    pub session_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let session_ttl_secs = match std::env::var("SESSION_TTL_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .context("SESSION_TTL_SECS must be a whole number of seconds")?,
            Err(_) => DEFAULT_SESSION_TTL_SECS,
        };

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            claude_model: optional_env("CLAUDE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            session_ttl: Duration::from_secs(session_ttl_secs),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
