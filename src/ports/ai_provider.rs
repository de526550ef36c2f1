//! AI Provider Port - Interface for the hosted language model.
//!
//! The harness needs exactly one capability from a model: turn a fully
//! assembled prompt into a response. History, summaries and windowing are
//! handled before the call, so the port takes a single prompt string.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct EchoProvider;
//!
//! #[async_trait]
//! impl AIProvider for EchoProvider {
//!     async fn generate(&self, prompt: &str, _max_tokens: u32) -> Result<ModelResponse, AIError> {
//!         Ok(ModelResponse::text("msg_1", "echo", prompt))
//!     }
//!
//!     fn provider_info(&self) -> ProviderInfo {
//!         ProviderInfo::new("echo", "echo")
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for language model interactions.
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Generate a response for a single user prompt.
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<ModelResponse, AIError>;

    /// Provider name and model, for logging.
    fn provider_info(&self) -> ProviderInfo;
}

/// Response returned by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResponse {
    /// Provider-assigned message id.
    pub id: String,
    /// Model that generated the response.
    pub model: String,
    /// Content blocks in the order the provider returned them.
    pub content: Vec<ContentBlock>,
}

impl ModelResponse {
    /// Creates a response holding a single text block.
    pub fn text(id: impl Into<String>, model: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            model: model.into(),
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }

    /// Concatenation of every text block, without separators.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(ContentBlock::as_text)
            .collect()
    }
}

/// One block of response content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text, the only block kind artifacts are extracted from.
    Text { text: String },
    /// Any other block kind (tool use, images, ...), kept by name only.
    Other { kind: String },
}

impl ContentBlock {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Other { .. } => None,
        }
    }
}

/// Provider information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "anthropic").
    pub name: String,
    /// Model identifier.
    pub model: String,
}

impl ProviderInfo {
    /// Creates new provider info.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// AI provider errors.
#[derive(Debug, thiserror::Error)]
pub enum AIError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Prompt exceeds the model's context window.
    #[error("context too long: {0}")]
    ContextTooLong(String),

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl AIError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AIError::RateLimited { .. }
                | AIError::Unavailable { .. }
                | AIError::Network(_)
                | AIError::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_content_concatenates_only_text_blocks() {
        let response = ModelResponse {
            id: "msg_1".to_string(),
            model: "m".to_string(),
            content: vec![
                ContentBlock::Text {
                    text: "Hello, ".to_string(),
                },
                ContentBlock::Other {
                    kind: "tool_use".to_string(),
                },
                ContentBlock::Text {
                    text: "world".to_string(),
                },
            ],
        };

        assert_eq!(response.text_content(), "Hello, world");
    }

    #[test]
    fn response_without_text_has_empty_content() {
        let response = ModelResponse {
            id: "msg_1".to_string(),
            model: "m".to_string(),
            content: vec![ContentBlock::Other {
                kind: "image".to_string(),
            }],
        };
        assert_eq!(response.text_content(), "");
    }

    #[test]
    fn content_block_serializes_with_type_tag() {
        let json = serde_json::to_value(ContentBlock::Text {
            text: "hi".to_string(),
        })
        .unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["text"], "hi");
    }

    #[test]
    fn ai_error_retryable_classification() {
        assert!(AIError::rate_limited(30).is_retryable());
        assert!(AIError::unavailable("down").is_retryable());
        assert!(AIError::network("reset").is_retryable());
        assert!(AIError::Timeout { timeout_secs: 30 }.is_retryable());

        assert!(!AIError::AuthenticationFailed.is_retryable());
        assert!(!AIError::ContextTooLong("too long".to_string()).is_retryable());
        assert!(!AIError::parse("bad json").is_retryable());
    }

    #[test]
    fn ai_error_displays_correctly() {
        let err = AIError::rate_limited(30);
        assert_eq!(err.to_string(), "rate limited: retry after 30s");

        let err = AIError::Timeout { timeout_secs: 600 };
        assert_eq!(err.to_string(), "request timed out after 600s");
    }
}
