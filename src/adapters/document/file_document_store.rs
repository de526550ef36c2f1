//! Filesystem DocumentStore - JSON documents in a directory tree.
//!
//! # Directory Structure
//!
//! ```text
//! {root}/
//! └── conversations/
//!     ├── 3f2a....json
//!     └── 3f2a.../
//!         └── artifacts/
//!             ├── 9b1c....json
//!             └── d04e....json
//! ```
//!
//! A collection path maps one-to-one onto directories, so a sub-collection
//! lives in a directory named after its parent document, next to that
//! document's file.
//!
//! # Atomic Writes
//!
//! Documents are written to `{id}.json.tmp`, synced, then renamed into place,
//! so a crash never leaves a half-written document behind.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::domain::foundation::Timestamp;
use crate::ports::{CollectionPath, Document, DocumentStore, DocumentStoreError};

const DOCUMENT_EXTENSION: &str = "json";

/// On-disk shape of a document.
#[derive(Debug, Serialize, Deserialize)]
struct StoredDocument {
    id: String,
    created_at: Timestamp,
    data: Value,
}

impl From<StoredDocument> for Document {
    fn from(stored: StoredDocument) -> Self {
        Document {
            id: stored.id,
            created_at: stored.created_at,
            data: stored.data,
        }
    }
}

/// Document store backed by JSON files under a root directory.
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    root: PathBuf,
    /// Serialises existence check and write so `create` stays create-only
    /// within this process.
    write_lock: Arc<Mutex<()>>,
}

impl FileDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    fn collection_dir(&self, collection: &CollectionPath) -> PathBuf {
        collection
            .segments()
            .iter()
            .fold(self.root.clone(), |dir, segment| dir.join(segment))
    }

    fn document_path(&self, collection: &CollectionPath, id: &str) -> PathBuf {
        self.collection_dir(collection)
            .join(format!("{}.{}", id, DOCUMENT_EXTENSION))
    }

    fn temp_path(&self, collection: &CollectionPath, id: &str) -> PathBuf {
        self.collection_dir(collection)
            .join(format!("{}.{}.tmp", id, DOCUMENT_EXTENSION))
    }

    /// Ids become file names; anything that could escape the directory is refused.
    fn check_id(id: &str) -> Result<(), DocumentStoreError> {
        if id.is_empty() || id.contains(['/', '\\']) || id == "." || id == ".." {
            return Err(DocumentStoreError::Io(format!("Invalid document id: {:?}", id)));
        }
        Ok(())
    }

    async fn read_document(path: &Path) -> Result<Option<Document>, DocumentStoreError> {
        let text = match fs::read_to_string(path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(DocumentStoreError::Io(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let stored: StoredDocument = serde_json::from_str(&text).map_err(|e| {
            DocumentStoreError::Serialization(format!("{}: {}", path.display(), e))
        })?;
        Ok(Some(stored.into()))
    }

    async fn write_atomically(
        &self,
        temp_path: &Path,
        final_path: &Path,
        content: &[u8],
    ) -> Result<(), DocumentStoreError> {
        let io_err = |action: &str, path: &Path, e: std::io::Error| {
            DocumentStoreError::Io(format!("Failed to {} {}: {}", action, path.display(), e))
        };

        let mut file = fs::File::create(temp_path)
            .await
            .map_err(|e| io_err("create", temp_path, e))?;
        file.write_all(content)
            .await
            .map_err(|e| io_err("write", temp_path, e))?;
        file.sync_all()
            .await
            .map_err(|e| io_err("sync", temp_path, e))?;

        fs::rename(temp_path, final_path)
            .await
            .map_err(|e| io_err("rename", temp_path, e))
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn create(
        &self,
        collection: &CollectionPath,
        id: &str,
        data: Value,
    ) -> Result<Document, DocumentStoreError> {
        Self::check_id(id)?;

        let _guard = self.write_lock.lock().await;

        let dir = self.collection_dir(collection);
        fs::create_dir_all(&dir).await.map_err(|e| {
            DocumentStoreError::Io(format!("Failed to create directory {}: {}", dir.display(), e))
        })?;

        let final_path = self.document_path(collection, id);
        let exists = fs::try_exists(&final_path)
            .await
            .map_err(|e| DocumentStoreError::Io(e.to_string()))?;
        if exists {
            return Err(DocumentStoreError::AlreadyExists {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }

        let stored = StoredDocument {
            id: id.to_string(),
            created_at: Timestamp::now(),
            data,
        };
        let bytes = serde_json::to_vec_pretty(&stored)
            .map_err(|e| DocumentStoreError::Serialization(e.to_string()))?;

        self.write_atomically(&self.temp_path(collection, id), &final_path, &bytes)
            .await?;

        Ok(stored.into())
    }

    async fn get(
        &self,
        collection: &CollectionPath,
        id: &str,
    ) -> Result<Option<Document>, DocumentStoreError> {
        Self::check_id(id)?;
        Self::read_document(&self.document_path(collection, id)).await
    }

    async fn stream(&self, collection: &CollectionPath) -> Result<Vec<Document>, DocumentStoreError> {
        let dir = self.collection_dir(collection);
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(DocumentStoreError::Io(format!(
                    "Failed to read directory {}: {}",
                    dir.display(),
                    e
                )))
            }
        };

        let mut documents = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DocumentStoreError::Io(e.to_string()))?
        {
            let path = entry.path();
            // Skips sub-collection directories and leftover temp files
            if path.extension().and_then(|e| e.to_str()) != Some(DOCUMENT_EXTENSION) {
                continue;
            }
            if let Some(document) = Self::read_document(&path).await? {
                documents.push(document);
            }
        }

        documents.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(documents)
    }

    async fn list_recent(
        &self,
        collection: &CollectionPath,
        limit: usize,
    ) -> Result<Vec<Document>, DocumentStoreError> {
        let mut documents = self.stream(collection).await?;
        documents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        documents.truncate(limit);
        Ok(documents)
    }
}
