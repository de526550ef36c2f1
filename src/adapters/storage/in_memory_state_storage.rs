//! In-Memory State Storage Adapter
//!
//! Holds the conversation state in memory. Useful for testing and development.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::conversation::ConversationState;
use crate::ports::{LoadOutcome, StateStorage, StateStorageError};

/// In-memory storage for conversation state
#[derive(Debug, Clone, Default)]
pub struct InMemoryStateStorage {
    state: Arc<RwLock<Option<ConversationState>>>,
}

impl InMemoryStateStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds `state`.
    pub fn with_state(state: ConversationState) -> Self {
        Self {
            state: Arc::new(RwLock::new(Some(state))),
        }
    }

    /// Forget the stored state (useful for tests)
    pub async fn clear(&self) {
        *self.state.write().await = None;
    }
}

#[async_trait]
impl StateStorage for InMemoryStateStorage {
    async fn save_state(&self, state: &ConversationState) -> Result<(), StateStorageError> {
        *self.state.write().await = Some(state.clone());
        Ok(())
    }

    async fn load_state(&self) -> Result<LoadOutcome, StateStorageError> {
        Ok(match self.state.read().await.clone() {
            Some(state) => LoadOutcome::Loaded(state),
            None => LoadOutcome::NotFound(ConversationState::new()),
        })
    }
}
