//! File-based State Storage Adapter
//!
//! Stores the conversation state as a single document on disk. The file
//! extension picks the format: `.yaml`/`.yml` for YAML, anything else JSON.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::conversation::{ConversationState, StateFormat};
use crate::ports::{LoadOutcome, StateStorage, StateStorageError};

/// File-based storage for conversation state
#[derive(Debug, Clone)]
pub struct FileStateStorage {
    path: PathBuf,
    format: StateFormat,
}

impl FileStateStorage {
    /// Create a storage bound to one state file
    ///
    /// # Example
    /// ```ignore
    /// let storage = FileStateStorage::new("conversation_state.json");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let format = StateFormat::from_path(&path);
        Self { path, format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> StateFormat {
        self.format
    }

    /// Ensure the parent directory exists
    async fn ensure_parent_dir(&self) -> Result<(), StateStorageError> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
                .await
                .map_err(|e| StateStorageError::IoError(e.to_string())),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl StateStorage for FileStateStorage {
    async fn save_state(&self, state: &ConversationState) -> Result<(), StateStorageError> {
        self.ensure_parent_dir().await?;

        let text = self.format.serialize(state)?;

        fs::write(&self.path, text)
            .await
            .map_err(|e| StateStorageError::IoError(e.to_string()))?;

        tracing::debug!(path = %self.path.display(), messages = state.message_count(), "Saved conversation state");
        Ok(())
    }

    async fn load_state(&self) -> Result<LoadOutcome, StateStorageError> {
        let text = match fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    path = %self.path.display(),
                    "State file not found, starting with empty state"
                );
                return Ok(LoadOutcome::NotFound(ConversationState::new()));
            }
            Err(e) => return Err(StateStorageError::IoError(e.to_string())),
        };

        let state = self.format.deserialize(&text)?;
        Ok(LoadOutcome::Loaded(state))
    }
}
