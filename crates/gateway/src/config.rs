//! Environment-driven gateway configuration.

use std::time::Duration;

/// Default API base for the Gemini REST surface.
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default per-request timeout. Image composition calls routinely take
/// tens of seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 90;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
}

/// Connection settings for [`GeminiGateway`](crate::GeminiGateway).
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL, e.g. `https://generativelanguage.googleapis.com/v1beta`.
    pub api_base: String,
    pub api_key: String,
    pub request_timeout: Duration,
}

impl GatewayConfig {
    pub fn new(api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_base: trim_base(api_base.into()),
            api_key: api_key.into(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Read configuration from the environment:
    /// `ATTIRE_MODEL_API_KEY` (required), `ATTIRE_MODEL_API_BASE`,
    /// `ATTIRE_MODEL_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("ATTIRE_MODEL_API_KEY")
            .map_err(|_| ConfigError::MissingVar("ATTIRE_MODEL_API_KEY"))?;
        let api_base = std::env::var("ATTIRE_MODEL_API_BASE")
            .unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let timeout_secs = std::env::var("ATTIRE_MODEL_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Ok(Self {
            request_timeout: Duration::from_secs(timeout_secs),
            ..Self::new(api_base, api_key)
        })
    }
}

fn trim_base(base: String) -> String {
    base.trim().trim_end_matches('/').to_string()
}
