//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (identifiers, timestamps)
//! - `conversation` - Message history, summary, shared files and prompt assembly
//! - `artifact` - Artifact extraction and export naming

pub mod artifact;
pub mod conversation;
pub mod foundation;
