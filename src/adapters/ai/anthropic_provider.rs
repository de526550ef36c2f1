//! Anthropic Provider - Implementation of AIProvider for Anthropic's Messages API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AnthropicConfig::new(api_key)
//!     .with_model("claude-3-7-sonnet-20250219")
//!     .with_timeout(Duration::from_secs(600));
//!
//! let provider = AnthropicProvider::new(config)?;
//! ```
//!
//! Every prompt is sent as a single user message; conversation history is
//! already folded into the prompt text by the caller.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{AIError, AIProvider, ContentBlock, ModelResponse, ProviderInfo};

/// Configuration for the Anthropic provider.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use.
    pub model: String,
    /// Base URL for the API (default: https://api.anthropic.com).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Transport-level retries on retryable failures. Zero disables retrying.
    pub max_retries: u32,
}

impl AnthropicConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_secret(Secret::new(api_key.into()))
    }

    /// Creates a new configuration from an already wrapped API key.
    pub fn from_secret(api_key: Secret<String>) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            timeout: Duration::from_secs(600),
            max_retries: 0,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Model used when neither credentials nor configuration name one.
pub const DEFAULT_MODEL: &str = "claude-3-7-sonnet-20250219";

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Anthropic API provider implementation.
pub struct AnthropicProvider {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicProvider {
    /// Creates a new Anthropic provider with the given configuration.
    pub fn new(config: AnthropicConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Whole seconds of `timeout`, saturating at `u32::MAX`.
    fn timeout_secs(timeout: Duration) -> u32 {
        u32::try_from(timeout.as_secs()).unwrap_or(u32::MAX)
    }

    /// Builds the messages endpoint URL.
    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }

    fn to_anthropic_request(&self, prompt: &str, max_tokens: u32) -> AnthropicRequest {
        AnthropicRequest {
            model: self.config.model.clone(),
            max_tokens,
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        }
    }

    /// Sends a request.
    async fn send_request(&self, prompt: &str, max_tokens: u32) -> Result<Response, AIError> {
        let anthropic_request = self.to_anthropic_request(prompt, max_tokens);

        self.client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("Content-Type", "application/json")
            .json(&anthropic_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: Self::timeout_secs(self.config.timeout),
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(Self::error_for_status(status.as_u16(), error_body))
    }

    /// Maps a non-success status and its body to an error.
    fn error_for_status(status: u16, error_body: String) -> AIError {
        match status {
            401 | 403 => AIError::AuthenticationFailed,
            429 => AIError::rate_limited(Self::parse_retry_after(&error_body)),
            400 if error_body.contains("prompt is too long") => AIError::ContextTooLong(error_body),
            400 | 404 | 413 | 422 => AIError::InvalidRequest(error_body),
            500..=599 => AIError::unavailable(format!("Server error {}: {}", status, error_body)),
            _ => AIError::network(format!("Unexpected status {}: {}", status, error_body)),
        }
    }

    /// Parses retry-after from error response.
    fn parse_retry_after(error_body: &str) -> u32 {
        if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(error_body) {
            if let Some(s) = parsed
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
            {
                if let Some(idx) = s.find("try again in ") {
                    let digits: String = s[idx + 13..]
                        .chars()
                        .take_while(|c| c.is_ascii_digit())
                        .collect();
                    if let Ok(secs) = digits.parse::<u32>() {
                        return secs;
                    }
                }
            }
        }
        60
    }

    /// Parses a successful response body.
    async fn parse_response(&self, response: Response) -> Result<ModelResponse, AIError> {
        let response = self.handle_response_status(response).await?;

        let anthropic_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        Ok(anthropic_response.into())
    }

    async fn attempt(&self, prompt: &str, max_tokens: u32) -> Result<ModelResponse, AIError> {
        let response = self.send_request(prompt, max_tokens).await?;
        self.parse_response(response).await
    }
}

#[async_trait]
impl AIProvider for AnthropicProvider {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<ModelResponse, AIError> {
        let mut retry_count = 0;

        loop {
            match self.attempt(prompt, max_tokens).await {
                Ok(response) => {
                    tracing::debug!(
                        message_id = %response.id,
                        model = %response.model,
                        "Received response from Anthropic"
                    );
                    return Ok(response);
                }
                Err(err) if err.is_retryable() && retry_count < self.config.max_retries => {
                    tracing::warn!(attempt = retry_count + 1, "Anthropic request failed, retrying: {}", err);
                }
                Err(err) => {
                    tracing::error!(model = %self.config.model, "Error sending message to Anthropic: {}", err);
                    return Err(err);
                }
            }

            // Exponential backoff: 1s, 2s, 4s, ...
            sleep(Duration::from_secs(1 << retry_count.min(6))).await;
            retry_count += 1;
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("anthropic", &self.config.model)
    }
}

// ----- Anthropic API Types -----

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<AnthropicMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    id: String,
    model: String,
    content: Vec<AnthropicContentBlock>,
}

#[derive(Debug, Deserialize)]
struct AnthropicContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

impl From<AnthropicResponse> for ModelResponse {
    fn from(response: AnthropicResponse) -> Self {
        let content = response
            .content
            .into_iter()
            .map(|block| match (block.block_type.as_str(), block.text) {
                ("text", Some(text)) => ContentBlock::Text { text },
                _ => ContentBlock::Other {
                    kind: block.block_type,
                },
            })
            .collect();

        ModelResponse {
            id: response.id,
            model: response.model,
            content,
        }
    }
}
