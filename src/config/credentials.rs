//! Credentials file
//!
//! ```json
//! { "anthropic": { "api_key": "sk-ant-...", "model": "claude-3-7-sonnet-20250219" } }
//! ```

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::Path;

use super::ai::AiConfig;
use super::error::ConfigError;

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub anthropic: AnthropicCredentials,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicCredentials {
    pub api_key: Secret<String>,
    #[serde(default)]
    pub model: Option<String>,
}

impl Credentials {
    /// Read and parse a credentials file. A missing file is fatal.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::CredentialsNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::CredentialsUnreadable {
                path: path.display().to_string(),
                reason: e.to_string(),
            },
        })?;

        let credentials: Credentials =
            serde_json::from_str(&text).map_err(|e| ConfigError::CredentialsInvalid {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        if credentials.anthropic.api_key.expose_secret().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        Ok(credentials)
    }
}

/// API key and model after applying configuration overrides.
#[derive(Debug, Clone)]
pub struct ResolvedCredentials {
    pub api_key: Secret<String>,
    /// `None` leaves the choice to the provider's default.
    pub model: Option<String>,
}

impl AiConfig {
    /// Combine overrides with the credentials file.
    ///
    /// The file is only read when no API key override is configured; the model
    /// override wins over the file's model either way.
    pub fn resolve_credentials(&self) -> Result<ResolvedCredentials, ConfigError> {
        if let Some(api_key) = self
            .anthropic_api_key
            .as_ref()
            .filter(|_| self.has_api_key_override())
        {
            return Ok(ResolvedCredentials {
                api_key: api_key.clone(),
                model: self.model.clone(),
            });
        }

        let credentials = Credentials::load(&self.credentials_path)?;
        Ok(ResolvedCredentials {
            api_key: credentials.anthropic.api_key,
            model: self.model.clone().or(credentials.anthropic.model),
        })
    }
}
