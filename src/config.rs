use anyhow::{Context, Result};

use crate::llm_client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Environment variable holding the required API secret.
pub const API_KEY_VAR: &str = "SERVICE_API_KEY";
/// Environment variable overriding the chat-completion endpoint base URL.
pub const BASE_URL_VAR: &str = "SERVICE_BASE_URL";
/// Environment variable overriding the model identifier.
pub const MODEL_VAR: &str = "SERVICE_MODEL";

/// Service configuration loaded from environment variables.
/// Construction fails if the required secret is missing — before any
/// network interaction is attempted.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Core lookup logic, factored out so tests can supply their own
    /// environment without mutating process state.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = get(API_KEY_VAR)
            .filter(|key| !key.is_empty())
            .with_context(|| format!("Required environment variable '{API_KEY_VAR}' is not set"))?;

        Ok(Config {
            api_key,
            base_url: get(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: get(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }
}
