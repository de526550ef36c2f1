//! Artifact Harness - conversational assistant harness for markdown artifacts
//!
//! Sends prompts to a hosted language model with a rolling conversation
//! context, extracts markdown artifacts from the responses, exports them as
//! files and archives conversations in a hierarchical document store.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
