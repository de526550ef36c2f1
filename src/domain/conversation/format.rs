//! Text document formats for a serialized conversation state.

use std::path::Path;

use super::state::ConversationState;

/// Errors raised while converting a state to or from text.
#[derive(Debug, thiserror::Error)]
pub enum StateFormatError {
    #[error("Failed to serialize state: {0}")]
    Serialize(String),

    #[error("Failed to deserialize state: {0}")]
    Deserialize(String),
}

/// Structured text format of a state document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateFormat {
    #[default]
    Json,
    Yaml,
}

impl StateFormat {
    /// Pick the format from a file extension; anything but `.yaml`/`.yml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                StateFormat::Yaml
            }
            _ => StateFormat::Json,
        }
    }

    pub fn serialize(&self, state: &ConversationState) -> Result<String, StateFormatError> {
        match self {
            StateFormat::Json => serde_json::to_string_pretty(state)
                .map_err(|e| StateFormatError::Serialize(e.to_string())),
            StateFormat::Yaml => {
                serde_yaml::to_string(state).map_err(|e| StateFormatError::Serialize(e.to_string()))
            }
        }
    }

    pub fn deserialize(&self, text: &str) -> Result<ConversationState, StateFormatError> {
        match self {
            StateFormat::Json => {
                serde_json::from_str(text).map_err(|e| StateFormatError::Deserialize(e.to_string()))
            }
            StateFormat::Yaml => {
                serde_yaml::from_str(text).map_err(|e| StateFormatError::Deserialize(e.to_string()))
            }
        }
    }
}
