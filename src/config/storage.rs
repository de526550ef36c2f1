//! Storage locations

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where state, exported artifacts and archived documents live
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Conversation state file (`.json`, `.yaml` or `.yml`)
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    /// Directory for exported markdown artifacts
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    /// Root directory of the file document store
    #[serde(default = "default_document_store_dir")]
    pub document_store_dir: PathBuf,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.state_file.as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath("storage.state_file"));
        }
        if self.export_dir.as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath("storage.export_dir"));
        }
        if self.document_store_dir.as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath("storage.document_store_dir"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            export_dir: default_export_dir(),
            document_store_dir: default_document_store_dir(),
        }
    }
}

fn default_state_file() -> PathBuf {
    PathBuf::from("conversation_state.json")
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("extracted_artifacts")
}

fn default_document_store_dir() -> PathBuf {
    PathBuf::from("data/store")
}
