//! Assistant - one prompt/response exchange against the model.
//!
//! Composes the prompt from the conversation state, sends it, and on success
//! records the exchange. A failed call leaves the state untouched.

use std::sync::Arc;

use crate::domain::conversation::ConversationState;
use crate::ports::{AIError, AIProvider};

/// Response budget used when a request does not name one.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Per-request switches for [`Assistant::ask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AskOptions {
    pub include_history: bool,
    pub include_summary: bool,
    /// Falls back to the assistant's default when `None`.
    pub max_tokens: Option<u32>,
}

impl Default for AskOptions {
    fn default() -> Self {
        Self {
            include_history: true,
            include_summary: true,
            max_tokens: None,
        }
    }
}

impl AskOptions {
    /// Send the prompt on its own, without history or summary.
    pub fn standalone() -> Self {
        Self {
            include_history: false,
            include_summary: false,
            max_tokens: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Outcome of a successful exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskResult {
    pub message_id: String,
    pub model: String,
    /// Concatenated text of the response.
    pub content: String,
    /// Rough estimate: whitespace-separated words of the full prompt / 3.
    pub tokens_used: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("AI provider error: {0}")]
    Provider(#[from] AIError),
}

/// Sends prompts and keeps the conversation ledger current.
pub struct Assistant<P: ?Sized + AIProvider> {
    ai_provider: Arc<P>,
    default_max_tokens: u32,
}

impl<P: ?Sized + AIProvider> Assistant<P> {
    pub fn new(ai_provider: Arc<P>) -> Self {
        Self {
            ai_provider,
            default_max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_default_max_tokens(mut self, max_tokens: u32) -> Self {
        self.default_max_tokens = max_tokens;
        self
    }

    pub async fn ask(
        &self,
        state: &mut ConversationState,
        prompt: &str,
        options: AskOptions,
    ) -> Result<AskResult, AssistantError> {
        // 1. Assemble the full prompt
        let full_prompt = state.compose(prompt, options.include_history, options.include_summary);
        let max_tokens = options.max_tokens.unwrap_or(self.default_max_tokens);
        let provider = self.ai_provider.provider_info();

        tracing::info!(
            provider = %provider.name,
            model = %provider.model,
            include_history = options.include_history,
            include_summary = options.include_summary,
            max_tokens,
            "Sending prompt"
        );

        // 2. Call the model
        let response = self
            .ai_provider
            .generate(&full_prompt, max_tokens)
            .await
            .map_err(|err| {
                tracing::error!(provider = %provider.name, error = %err, "Model request failed");
                err
            })?;

        // 3. Record the exchange
        let content = response.text_content();
        state.record(prompt, content.as_str());

        tracing::info!(
            message_id = %response.id,
            messages = state.message_count(),
            "Recorded exchange"
        );

        Ok(AskResult {
            message_id: response.id,
            model: response.model,
            content,
            tokens_used: full_prompt.split_whitespace().count() / 3,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::ports::ContentBlock;

    fn assistant(mock: &MockAIProvider) -> Assistant<MockAIProvider> {
        Assistant::new(Arc::new(mock.clone()))
    }

    #[tokio::test]
    async fn ask_records_exchange_and_returns_text() {
        let mock = MockAIProvider::new().with_response("Hello!");
        let mut state = ConversationState::new();

        let result = assistant(&mock)
            .ask(&mut state, "Hi", AskOptions::default())
            .await
            .unwrap();

        assert_eq!(result.content, "Hello!");
        assert_eq!(result.model, "mock-model-1");
        assert_eq!(state.message_count(), 2);
        assert_eq!(state.messages()[0].content(), "Hi");
        assert_eq!(state.messages()[1].content(), "Hello!");
    }

    #[tokio::test]
    async fn history_and_summary_are_sent_but_not_recorded() {
        let mock = MockAIProvider::new();
        let mut state = ConversationState::new();
        state.record("earlier question", "earlier answer");
        state.set_summary("We met.");

        assistant(&mock)
            .ask(&mut state, "Next?", AskOptions::default())
            .await
            .unwrap();

        let sent = mock.last_prompt().unwrap();
        assert!(sent.starts_with("# Previous Conversation Summary\nWe met.\n\n"));
        assert!(sent.contains("Human: earlier question\n\n"));
        assert!(sent.ends_with("# New Question\nNext?"));
        assert_eq!(state.messages()[2].content(), "Next?");
    }

    #[tokio::test]
    async fn standalone_sends_prompt_verbatim() {
        let mock = MockAIProvider::new();
        let mut state = ConversationState::new();
        state.record("q", "a");

        assistant(&mock)
            .ask(&mut state, "alone", AskOptions::standalone())
            .await
            .unwrap();

        assert_eq!(mock.last_prompt().as_deref(), Some("alone"));
    }

    #[tokio::test]
    async fn default_and_overridden_token_budgets() {
        let mock = MockAIProvider::new();
        let assistant = assistant(&mock);
        let mut state = ConversationState::new();

        assistant.ask(&mut state, "a", AskOptions::default()).await.unwrap();
        assistant
            .ask(&mut state, "b", AskOptions::default().with_max_tokens(50))
            .await
            .unwrap();

        let calls = mock.get_calls();
        assert_eq!(calls[0].max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(calls[1].max_tokens, 50);
    }

    #[tokio::test]
    async fn failure_leaves_state_unchanged() {
        let mock = MockAIProvider::new().with_error(MockError::AuthenticationFailed);
        let mut state = ConversationState::new();
        state.record("q", "a");
        let before = state.clone();

        let err = assistant(&mock)
            .ask(&mut state, "will fail", AskOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AssistantError::Provider(AIError::AuthenticationFailed)));
        assert_eq!(state, before);
    }

    #[tokio::test]
    async fn non_text_blocks_are_ignored() {
        let mock = MockAIProvider::new().with_content(vec![
            ContentBlock::Text {
                text: "part one, ".to_string(),
            },
            ContentBlock::Other {
                kind: "tool_use".to_string(),
            },
            ContentBlock::Text {
                text: "part two".to_string(),
            },
        ]);
        let mut state = ConversationState::new();

        let result = assistant(&mock)
            .ask(&mut state, "x", AskOptions::default())
            .await
            .unwrap();

        assert_eq!(result.content, "part one, part two");
    }

    #[tokio::test]
    async fn tokens_used_is_a_third_of_prompt_words() {
        let mock = MockAIProvider::new();
        let mut state = ConversationState::new();

        let result = assistant(&mock)
            .ask(&mut state, "one two three four five six seven", AskOptions::standalone())
            .await
            .unwrap();

        assert_eq!(result.tokens_used, 2);
    }
}
