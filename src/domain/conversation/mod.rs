//! Conversation domain module.
//!
//! Holds the rolling conversation ledger and the prompt window policy.

mod format;
mod message;
mod state;

pub use format::{StateFormat, StateFormatError};
pub use message::{Message, MessageRole};
pub use state::{ConversationState, HISTORY_WINDOW};
