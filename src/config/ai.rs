//! AI provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// JSON credentials file holding the Anthropic key and model
    #[serde(default = "default_credentials_path")]
    pub credentials_path: PathBuf,

    /// Anthropic API key; takes precedence over the credentials file
    pub anthropic_api_key: Option<Secret<String>>,

    /// Model override; takes precedence over the credentials file
    pub model: Option<String>,

    /// Anthropic API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Response budget per request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Transport retries on retryable failures
    #[serde(default)]
    pub max_retries: u32,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key override is set
    pub fn has_api_key_override(&self) -> bool {
        self.anthropic_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_tokens == 0 {
            return Err(ValidationError::InvalidMaxTokens);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.base_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("ai.base_url"));
        }
        if !self.has_api_key_override() && self.credentials_path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath("ai.credentials_path"));
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            credentials_path: default_credentials_path(),
            anthropic_api_key: None,
            model: None,
            base_url: default_base_url(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout(),
            max_retries: 0,
        }
    }
}

fn default_credentials_path() -> PathBuf {
    PathBuf::from("config/credentials.json")
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_timeout() -> u64 {
    600
}
