//! State Storage Port - Interface for persisting conversation state.
//!
//! A missing state document is an expected condition (first run), not an
//! error: loading reports it as [`LoadOutcome::NotFound`] carrying a fresh
//! empty state. Any other failure is an error.

use async_trait::async_trait;

use crate::domain::conversation::{ConversationState, StateFormatError};

/// Errors that can occur during state storage operations
#[derive(Debug, thiserror::Error)]
pub enum StateStorageError {
    #[error("Failed to serialize state: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize state: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<StateFormatError> for StateStorageError {
    fn from(err: StateFormatError) -> Self {
        match err {
            StateFormatError::Serialize(msg) => StateStorageError::SerializationFailed(msg),
            StateFormatError::Deserialize(msg) => StateStorageError::DeserializationFailed(msg),
        }
    }
}

/// Result of a successful load attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// A stored state was read.
    Loaded(ConversationState),
    /// Nothing was stored; carries an empty state to continue with.
    NotFound(ConversationState),
}

impl LoadOutcome {
    /// The state to continue with, whichever way it was obtained.
    pub fn into_state(self) -> ConversationState {
        match self {
            LoadOutcome::Loaded(state) | LoadOutcome::NotFound(state) => state,
        }
    }

    pub fn was_found(&self) -> bool {
        matches!(self, LoadOutcome::Loaded(_))
    }
}

/// Port for persisting and loading conversation state
#[async_trait]
pub trait StateStorage: Send + Sync {
    /// Save conversation state, replacing any previous copy.
    ///
    /// # Errors
    /// Returns `StateStorageError` if save fails
    async fn save_state(&self, state: &ConversationState) -> Result<(), StateStorageError>;

    /// Load conversation state
    ///
    /// # Returns
    /// `LoadOutcome::NotFound` with an empty state if nothing is stored
    ///
    /// # Errors
    /// Returns `StateStorageError` for unreadable or malformed state
    async fn load_state(&self) -> Result<LoadOutcome, StateStorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_outcome_yields_usable_state() {
        let outcome = LoadOutcome::NotFound(ConversationState::new());
        assert!(!outcome.was_found());
        assert!(outcome.into_state().is_empty());
    }

    #[test]
    fn format_errors_map_to_storage_errors() {
        let err: StateStorageError = StateFormatError::Deserialize("eof".to_string()).into();
        assert!(matches!(err, StateStorageError::DeserializationFailed(_)));
        assert!(err.to_string().contains("deserialize"));
    }
}
