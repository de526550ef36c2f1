//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `ARTIFACT_HARNESS` prefix and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use artifact_harness::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("State file: {}", config.storage.state_file.display());
//! ```

mod ai;
mod credentials;
mod error;
mod storage;

pub use ai::AiConfig;
pub use credentials::{AnthropicCredentials, Credentials, ResolvedCredentials};
pub use error::{ConfigError, ValidationError};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Model access (credentials, budget, timeouts)
    #[serde(default)]
    pub ai: AiConfig,

    /// File locations
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text
    #[serde(default)]
    pub log_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ai: AiConfig::default(),
            storage: StorageConfig::default(),
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Build the configuration from the process environment.
    ///
    /// A `.env` file is read first when present. Keys take the form
    /// `ARTIFACT_HARNESS__<SECTION>__<FIELD>`, for example
    /// `ARTIFACT_HARNESS__AI__MAX_TOKENS=2000` or
    /// `ARTIFACT_HARNESS__STORAGE__STATE_FILE=state.yaml`.
    /// Unset keys fall back to their defaults.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ARTIFACT_HARNESS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for zero limits or empty paths.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.storage.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "ARTIFACT_HARNESS__AI__ANTHROPIC_API_KEY",
        "ARTIFACT_HARNESS__AI__MODEL",
        "ARTIFACT_HARNESS__AI__MAX_TOKENS",
        "ARTIFACT_HARNESS__AI__TIMEOUT_SECS",
        "ARTIFACT_HARNESS__STORAGE__STATE_FILE",
        "ARTIFACT_HARNESS__STORAGE__EXPORT_DIR",
        "ARTIFACT_HARNESS__LOG_LEVEL",
        "ARTIFACT_HARNESS__LOG_JSON",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.ai.max_tokens, 1000);
        assert_eq!(config.storage.state_file, PathBuf::from("conversation_state.json"));
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ARTIFACT_HARNESS__AI__ANTHROPIC_API_KEY", "sk-ant-xxx");
        env::set_var("ARTIFACT_HARNESS__AI__MODEL", "claude-test");
        env::set_var("ARTIFACT_HARNESS__AI__MAX_TOKENS", "2000");
        env::set_var("ARTIFACT_HARNESS__STORAGE__STATE_FILE", "state.yaml");
        env::set_var("ARTIFACT_HARNESS__LOG_JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.ai.anthropic_api_key.as_ref().map(|k| k.expose_secret().as_str()),
            Some("sk-ant-xxx")
        );
        assert_eq!(config.ai.model.as_deref(), Some("claude-test"));
        assert_eq!(config.ai.max_tokens, 2000);
        assert_eq!(config.storage.state_file, PathBuf::from("state.yaml"));
        assert!(config.log_json);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ARTIFACT_HARNESS__AI__TIMEOUT_SECS", "0");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(config.validate(), Err(ValidationError::InvalidTimeout)));
    }
}
