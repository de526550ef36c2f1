//! Document Store Port - Interface for a hierarchical document database.
//!
//! Models the collection → document → sub-collection → document layout of
//! stores such as Firestore. Documents carry an opaque JSON payload and a
//! creation timestamp assigned by the store, never by the caller.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

use crate::domain::foundation::Timestamp;

/// Path of a collection: a top-level name, optionally followed by
/// `document id / sub-collection name` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionPath(Vec<String>);

impl CollectionPath {
    /// A top-level collection.
    pub fn root(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// A sub-collection under one document of this collection.
    pub fn child(&self, document_id: impl Into<String>, name: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(document_id.into());
        segments.push(name.into());
        Self(segments)
    }

    /// Path segments, alternating collection and document names.
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// A stored document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    /// Assigned by the store when the document was created.
    pub created_at: Timestamp,
    pub data: Value,
}

/// Errors from document store operations.
#[derive(Debug, thiserror::Error)]
pub enum DocumentStoreError {
    #[error("Document already exists: {collection}/{id}")]
    AlreadyExists { collection: String, id: String },

    #[error("Failed to serialize document: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Document store unavailable: {0}")]
    Unavailable(String),
}

/// Port for the document database.
///
/// Writes are create-only; there is no update or delete, and nothing spans
/// more than one document, so a parent and its children are never written
/// atomically.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create a document, stamping its creation time.
    ///
    /// # Errors
    ///
    /// Returns `DocumentStoreError::AlreadyExists` if the id is taken.
    async fn create(
        &self,
        collection: &CollectionPath,
        id: &str,
        data: Value,
    ) -> Result<Document, DocumentStoreError>;

    /// Fetch one document. Absence is `Ok(None)`.
    async fn get(
        &self,
        collection: &CollectionPath,
        id: &str,
    ) -> Result<Option<Document>, DocumentStoreError>;

    /// Every document of a collection, ordered by id.
    async fn stream(&self, collection: &CollectionPath) -> Result<Vec<Document>, DocumentStoreError>;

    /// At most `limit` documents, newest `created_at` first.
    async fn list_recent(
        &self,
        collection: &CollectionPath,
        limit: usize,
    ) -> Result<Vec<Document>, DocumentStoreError>;
}
