//! Summarizer - compresses the conversation into a carried-forward summary.

use std::sync::Arc;

use crate::domain::conversation::ConversationState;
use crate::ports::AIProvider;

use super::assistant::{AskOptions, Assistant, AssistantError};

/// Minimum history length worth summarizing: one full exchange.
const MIN_MESSAGES: usize = 2;

/// Result of a summarization attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    /// The summary was replaced with this text.
    Updated(String),
    /// Too little history; nothing was sent.
    NothingToSummarize,
}

/// Asks the model to summarize the whole history and stores the result.
pub struct Summarizer<P: ?Sized + AIProvider> {
    assistant: Arc<Assistant<P>>,
}

impl<P: ?Sized + AIProvider> Summarizer<P> {
    pub fn new(assistant: Arc<Assistant<P>>) -> Self {
        Self { assistant }
    }

    /// Summarize every message so far and overwrite the stored summary.
    ///
    /// The summary request itself goes through the normal ask path, so it is
    /// recorded in the history like any other exchange. History and summary
    /// inclusion are off for that request.
    pub async fn summarize(
        &self,
        state: &mut ConversationState,
    ) -> Result<SummaryOutcome, AssistantError> {
        if state.message_count() < MIN_MESSAGES {
            tracing::info!(messages = state.message_count(), "Not enough conversation to summarize");
            return Ok(SummaryOutcome::NothingToSummarize);
        }

        let prompt = summary_prompt(&state.render_full_history());
        let result = self
            .assistant
            .ask(state, &prompt, AskOptions::standalone())
            .await?;

        state.set_summary(result.content.as_str());
        tracing::info!(chars = result.content.len(), "Conversation summary updated");

        Ok(SummaryOutcome::Updated(result.content))
    }
}

fn summary_prompt(transcript: &str) -> String {
    format!(
        "\nPlease provide a concise summary of our conversation so far. Focus on:\n\
         1. The main project goal\n\
         2. Current progress and implementation details\n\
         3. Key decisions made\n\
         4. Current issues or questions being addressed\n\
         \n\
         Here's the conversation to summarize:\n\
         \n\
         {}\n",
        transcript
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;

    fn summarizer(mock: &MockAIProvider) -> Summarizer<MockAIProvider> {
        Summarizer::new(Arc::new(Assistant::new(Arc::new(mock.clone()))))
    }

    #[tokio::test]
    async fn too_short_history_is_not_sent() {
        let mock = MockAIProvider::new();
        let mut state = ConversationState::new();

        let outcome = summarizer(&mock).summarize(&mut state).await.unwrap();

        assert_eq!(outcome, SummaryOutcome::NothingToSummarize);
        assert_eq!(mock.call_count(), 0);
        assert!(state.summary().is_none());
    }

    #[tokio::test]
    async fn summary_replaces_previous_and_is_recorded() {
        let mock = MockAIProvider::new().with_response("Short summary.");
        let mut state = ConversationState::new();
        state.record("What is X?", "X is Y.");
        state.set_summary("old");

        let outcome = summarizer(&mock).summarize(&mut state).await.unwrap();

        assert_eq!(outcome, SummaryOutcome::Updated("Short summary.".to_string()));
        assert_eq!(state.summary(), Some("Short summary."));
        assert_eq!(state.message_count(), 4);
    }

    #[tokio::test]
    async fn prompt_embeds_full_history_without_window_or_summary() {
        let mock = MockAIProvider::new();
        let mut state = ConversationState::new();
        for i in 0..5 {
            state.record(format!("q{}", i), format!("a{}", i));
        }
        state.set_summary("should not be sent");

        summarizer(&mock).summarize(&mut state).await.unwrap();

        let sent = mock.last_prompt().unwrap();
        assert!(sent.contains("Human: q0\n\nAssistant: a0\n\n"));
        assert!(sent.contains("Human: q4\n\nAssistant: a4\n\n"));
        assert!(sent.contains("Key decisions made"));
        assert!(!sent.contains("should not be sent"));
        assert!(!sent.contains("# Previous Messages"));
    }
}
