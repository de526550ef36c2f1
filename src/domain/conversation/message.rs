//! Message entity for conversations.
//!
//! Messages are immutable records of user/assistant exchanges. Order in the
//! owning history is the conversation order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// User input.
    User,
    /// Model response.
    Assistant,
}

impl MessageRole {
    /// Speaker label used when a message is rendered into a prompt.
    pub fn speaker_label(&self) -> &'static str {
        match self {
            MessageRole::User => "Human",
            MessageRole::Assistant => "Assistant",
        }
    }
}

/// An immutable message within a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: MessageRole,
    content: String,
}

impl Message {
    /// Creates a new message with the given role and content.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Renders as `"<Human|Assistant>: <content>"`.
impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.role.speaker_label(), self.content)
    }
}
