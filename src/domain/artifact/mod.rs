//! Artifact domain module.
//!
//! Extraction of markdown artifacts from response text and the naming rules
//! used when they are exported as files.

#[allow(clippy::module_inception)]
mod artifact;
mod extractor;
mod filename;

pub use artifact::{Artifact, ArtifactKind};
pub use extractor::ArtifactExtractor;
pub use filename::{base_name, candidate_file_name, ARTIFACT_EXTENSION};
