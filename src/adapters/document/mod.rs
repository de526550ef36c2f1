//! Document adapters - Implementations of the DocumentStore port.
//!
//! - `FileDocumentStore` - JSON documents in a directory tree
//! - `InMemoryDocumentStore` - In-process store for tests

mod file_document_store;
mod in_memory_store;

pub use file_document_store::FileDocumentStore;
pub use in_memory_store::InMemoryDocumentStore;
