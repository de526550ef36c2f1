//! Conversation State Entity
//!
//! The rolling ledger of one conversation: message history, the carried
//! forward summary and the set of files shared so far. Prompt assembly lives
//! here because the window and summary policy are properties of the state,
//! not of any particular provider.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::message::{Message, MessageRole};

/// Number of most recent messages included when history is composed into a
/// prompt. Three user/assistant pairs.
pub const HISTORY_WINDOW: usize = 6;

const SUMMARY_HEADER: &str = "# Previous Conversation Summary\n";
const HISTORY_HEADER: &str = "# Previous Messages\n";
const NEW_QUESTION_HEADER: &str = "# New Question\n";

/// Complete state of a conversation.
///
/// Messages are append-only: the only way in is [`ConversationState::record`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationState {
    messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    /// Paths in first-seen order, without duplicates.
    #[serde(default)]
    shared_files: Vec<String>,
    last_updated: Timestamp,
}

impl ConversationState {
    /// Create an empty conversation state
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            summary: None,
            shared_files: Vec::new(),
            last_updated: Timestamp::now(),
        }
    }

    /// Every message, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The stored summary, empty or not.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn shared_files(&self) -> &[String] {
        &self.shared_files
    }

    pub fn last_updated(&self) -> Timestamp {
        self.last_updated
    }

    /// The messages eligible for inclusion in the next prompt.
    pub fn history_window(&self) -> &[Message] {
        let start = self.messages.len().saturating_sub(HISTORY_WINDOW);
        &self.messages[start..]
    }

    /// The summary, if one exists and is non-empty.
    pub fn active_summary(&self) -> Option<&str> {
        self.summary.as_deref().filter(|s| !s.is_empty())
    }

    /// Assemble the prompt for the next request.
    ///
    /// Layout, each part optional except the last:
    ///
    /// ```text
    /// # Previous Conversation Summary
    /// <summary>
    ///
    /// # Previous Messages
    /// Human: ...
    ///
    /// Assistant: ...
    ///
    /// # New Question
    /// <new_prompt>
    /// ```
    pub fn compose(&self, new_prompt: &str, include_history: bool, include_summary: bool) -> String {
        let mut prompt = String::new();

        if include_summary {
            if let Some(summary) = self.active_summary() {
                prompt.push_str(SUMMARY_HEADER);
                prompt.push_str(summary);
                prompt.push_str("\n\n");
            }
        }

        if include_history && !self.messages.is_empty() {
            prompt.push_str(HISTORY_HEADER);
            for message in self.history_window() {
                prompt.push_str(&message.to_string());
                prompt.push_str("\n\n");
            }
            prompt.push_str(NEW_QUESTION_HEADER);
        }

        prompt.push_str(new_prompt);

        tracing::debug!(
            include_history,
            include_summary,
            window = self.history_window().len(),
            "Composed prompt"
        );

        prompt
    }

    /// Record one successful exchange: the user prompt, then the response.
    pub fn record(&mut self, prompt: impl Into<String>, response_text: impl Into<String>) {
        self.messages.push(Message::new(MessageRole::User, prompt));
        self.messages.push(Message::new(MessageRole::Assistant, response_text));
        self.last_updated = Timestamp::now();
    }

    /// Add a path to the shared-file ledger. Returns false if it was already there.
    pub fn track_shared_file(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if self.shared_files.contains(&path) {
            return false;
        }
        self.shared_files.push(path);
        true
    }

    /// Replace the carried-forward summary.
    pub fn set_summary(&mut self, summary: impl Into<String>) {
        self.summary = Some(summary.into());
        self.last_updated = Timestamp::now();
    }

    /// Render every message, oldest first, in prompt format.
    pub fn render_full_history(&self) -> String {
        self.messages
            .iter()
            .map(|m| format!("{}\n\n", m))
            .collect()
    }

    /// Content of the most recent user message.
    pub fn last_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role() == MessageRole::User)
            .map(Message::content)
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}
