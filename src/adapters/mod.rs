//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Anthropic Messages API and a scripted mock
//! - `document` - Document stores (filesystem, in-memory)
//! - `export` - Markdown files for extracted artifacts
//! - `storage` - Conversation state persistence (file, in-memory)

pub mod ai;
pub mod document;
pub mod export;
pub mod storage;

pub use ai::{AnthropicConfig, AnthropicProvider, MockAIProvider};
pub use document::{FileDocumentStore, InMemoryDocumentStore};
pub use export::{ExportError, LocalArtifactExporter};
pub use storage::{FileStateStorage, InMemoryStateStorage};
