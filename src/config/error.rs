//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Credentials file not found at {path}")]
    CredentialsNotFound { path: String },

    #[error("Failed to read credentials file {path}: {reason}")]
    CredentialsUnreadable { path: String, reason: String },

    #[error("Invalid credentials file {path}: {reason}")]
    CredentialsInvalid { path: String, reason: String },

    #[error("Anthropic API key is not configured")]
    MissingApiKey,
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("max_tokens must be greater than zero")]
    InvalidMaxTokens,

    #[error("Path must not be empty: {0}")]
    EmptyPath(&'static str),
}
