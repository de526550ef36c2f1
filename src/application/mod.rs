//! Application layer - Services that orchestrate domain operations over ports.
//!
//! - `Assistant` - compose, send, record one exchange
//! - `Summarizer` - compress history into the carried-forward summary
//! - `FileSharing` - embed local files into a prompt
//! - `ProjectStructure` - indented directory listing with ignore globs
//! - `ArtifactArchive` - persist conversations and artifacts in a document store

mod assistant;
mod file_sharing;
mod persistence;
mod project_structure;
mod summarizer;

pub use assistant::{AskOptions, AskResult, Assistant, AssistantError, DEFAULT_MAX_TOKENS};
pub use file_sharing::{format_file_block, FileSharing, DEFAULT_SHARE_PREFIX};
pub use persistence::{ArchiveError, ArtifactArchive, PersistedArtifact, PersistedConversation};
pub use project_structure::{ProjectStructure, ProjectStructureError, DEFAULT_IGNORE_PATTERNS};
pub use summarizer::{SummaryOutcome, Summarizer};
