//! Mock AI Provider for testing.
//!
//! Provides a configurable mock implementation of the AIProvider port,
//! allowing tests to run without calling the hosted model.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response("Hello, I'm the assistant!")
//!     .with_error(MockError::AuthenticationFailed);
//!
//! let response = provider.generate("Hi", 1000).await?;
//! assert_eq!(response.text_content(), "Hello, I'm the assistant!");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{AIError, AIProvider, ContentBlock, ModelResponse, ProviderInfo};

/// Mock AI provider for testing.
///
/// Responses are consumed in order; once the queue is empty every call
/// answers "Mock response".
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    info: ProviderInfo,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return these content blocks.
    Success { content: Vec<ContentBlock> },
    /// Return an error.
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    ContextTooLong { message: String },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::ContextTooLong { message } => AIError::ContextTooLong(message),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
        }
    }
}

/// A prompt the mock received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub prompt: String,
    pub max_tokens: u32,
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-model-1"),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a single-text-block response to the queue.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.with_content(vec![ContentBlock::Text { text: text.into() }])
    }

    /// Adds a response with arbitrary content blocks.
    pub fn with_content(self, content: Vec<ContentBlock>) -> Self {
        self.push(MockResponse::Success { content });
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: MockError) -> Self {
        self.push(MockResponse::Error(error));
        self
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        self.lock_calls().len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<RecordedCall> {
        self.lock_calls().clone()
    }

    /// The most recent prompt, if any call was made.
    pub fn last_prompt(&self) -> Option<String> {
        self.lock_calls().last().map(|c| c.prompt.clone())
    }

    fn push(&self, response: MockResponse) {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(response);
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<RecordedCall>> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn next_response(&self) -> MockResponse {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success {
                content: vec![ContentBlock::Text {
                    text: "Mock response".to_string(),
                }],
            })
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<ModelResponse, AIError> {
        let call_number = {
            let mut calls = self.lock_calls();
            calls.push(RecordedCall {
                prompt: prompt.to_string(),
                max_tokens,
            });
            calls.len()
        };

        match self.next_response() {
            MockResponse::Success { content } => Ok(ModelResponse {
                id: format!("msg_mock_{}", call_number),
                model: self.info.model.clone(),
                content,
            }),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_configured_responses_in_order() {
        let provider = MockAIProvider::new()
            .with_response("first")
            .with_response("second");

        let a = provider.generate("a", 10).await.unwrap();
        let b = provider.generate("b", 10).await.unwrap();

        assert_eq!(a.text_content(), "first");
        assert_eq!(b.text_content(), "second");
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn falls_back_to_default_response() {
        let provider = MockAIProvider::new();
        let response = provider.generate("anything", 10).await.unwrap();
        assert_eq!(response.text_content(), "Mock response");
        assert_eq!(response.model, "mock-model-1");
    }

    #[tokio::test]
    async fn injected_errors_are_returned() {
        let provider = MockAIProvider::new().with_error(MockError::RateLimited {
            retry_after_secs: 5,
        });

        let err = provider.generate("x", 10).await.unwrap_err();
        assert!(matches!(err, AIError::RateLimited { retry_after_secs: 5 }));
    }

    #[tokio::test]
    async fn records_prompts_and_budgets() {
        let provider = MockAIProvider::new();
        provider.generate("hello", 1000).await.unwrap();
        provider.generate("again", 42).await.unwrap();

        assert_eq!(provider.call_count(), 2);
        assert_eq!(
            provider.get_calls()[1],
            RecordedCall {
                prompt: "again".to_string(),
                max_tokens: 42
            }
        );
        assert_eq!(provider.last_prompt().as_deref(), Some("again"));
    }

    #[tokio::test]
    async fn clones_share_queue_and_history() {
        let provider = MockAIProvider::new().with_response("shared");
        let clone = provider.clone();

        let response = clone.generate("p", 1).await.unwrap();
        assert_eq!(response.text_content(), "shared");
        assert_eq!(provider.call_count(), 1);
    }
}
