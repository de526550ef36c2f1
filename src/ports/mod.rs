//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - The hosted language model
//! - `DocumentStore` - Hierarchical document database for conversations and artifacts
//! - `StateStorage` - Persistence of the rolling conversation state

mod ai_provider;
mod document_store;
mod state_storage;

pub use ai_provider::{AIError, AIProvider, ContentBlock, ModelResponse, ProviderInfo};
pub use document_store::{CollectionPath, Document, DocumentStore, DocumentStoreError};
pub use state_storage::{LoadOutcome, StateStorage, StateStorageError};
