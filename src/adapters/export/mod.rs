//! Export adapters - writing artifacts out as files.

mod local_artifact_exporter;

pub use local_artifact_exporter::{ExportError, LocalArtifactExporter};
