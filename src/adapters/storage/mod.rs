//! Conversation state persistence.
//!
//! `FileStateStorage` keeps the whole state in one file whose extension picks
//! the format (`.yaml`/`.yml` for YAML, anything else JSON).
//! `InMemoryStateStorage` backs tests.

mod file_state_storage;
mod in_memory_state_storage;

pub use file_state_storage::FileStateStorage;
pub use in_memory_state_storage::InMemoryStateStorage;
