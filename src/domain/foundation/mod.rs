//! Foundation module - Shared domain primitives.
//!
//! Identifiers and timestamps shared by the conversation and artifact
//! domains and by the persistence records built on top of them.

mod ids;
mod timestamp;

pub use ids::{ArtifactId, ConversationId};
pub use timestamp::Timestamp;
