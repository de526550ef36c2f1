//! Local Artifact Exporter - writes artifacts as markdown files.
//!
//! File names follow `domain::artifact::base_name`; when a name is taken the
//! exporter tries `base_1.md`, `base_2.md`, ... and writes to the first free
//! one. Existing files are never overwritten.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::domain::artifact::{base_name, candidate_file_name, Artifact};

/// Errors from exporting artifacts to disk.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to create export directory {path}: {reason}")]
    CreateDir { path: String, reason: String },

    #[error("Failed to write {path}: {reason}")]
    Write { path: String, reason: String },
}

/// Exports artifacts into one directory.
#[derive(Debug, Clone)]
pub struct LocalArtifactExporter {
    output_dir: PathBuf,
}

impl LocalArtifactExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write one artifact and return the path it landed at.
    pub async fn export(&self, artifact: &Artifact) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| ExportError::CreateDir {
                path: self.output_dir.display().to_string(),
                reason: e.to_string(),
            })?;

        let base = base_name(artifact);
        let mut attempt = 0;

        loop {
            let path = self.output_dir.join(candidate_file_name(&base, attempt));

            // create_new fails if the name is taken, so check and claim are one step
            match OpenOptions::new().write(true).create_new(true).open(&path).await {
                Ok(file) => {
                    fill_claimed(&path, file, artifact.content()).await?;

                    tracing::info!(
                        path = %path.display(),
                        kind = %artifact.kind(),
                        "Exported artifact"
                    );
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => {
                    return Err(ExportError::Write {
                        path: path.display().to_string(),
                        reason: e.to_string(),
                    })
                }
            }
        }
    }

    /// Write every artifact in order.
    pub async fn export_all(&self, artifacts: &[Artifact]) -> Result<Vec<PathBuf>, ExportError> {
        let mut paths = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            paths.push(self.export(artifact).await?);
        }
        Ok(paths)
    }
}

/// Write `content` into a freshly claimed file. On failure the file is
/// removed so the name stays free for later exports.
async fn fill_claimed<W: AsyncWrite + Unpin>(
    path: &Path,
    mut file: W,
    content: &str,
) -> Result<(), ExportError> {
    let written = match file.write_all(content.as_bytes()).await {
        Ok(()) => file.flush().await,
        Err(e) => Err(e),
    };
    drop(file);

    if let Err(e) = written {
        if let Err(remove_err) = fs::remove_file(path).await {
            tracing::warn!(path = %path.display(), error = %remove_err, "Failed to remove partial export");
        }
        tracing::error!(path = %path.display(), error = %e, "Failed to write artifact");
        return Err(ExportError::Write {
            path: path.display().to_string(),
            reason: e.to_string(),
        });
    }

    Ok(())
}
