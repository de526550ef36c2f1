//! ProjectStructure - indented listing of a directory tree.
//!
//! ```text
//! my_project/
//!     Cargo.toml
//!     src/
//!         lib.rs
//! ```
//!
//! Within a directory, files come first and then subdirectories, each group
//! sorted by name. Names matching an ignore pattern are skipped, and an
//! ignored directory is not descended into.

use std::cmp::Ordering;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::{DirEntry, WalkDir};

/// Build and tooling noise left out unless other patterns are given.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    "__pycache__",
    "*.pyc",
    ".git",
    ".ipynb_checkpoints",
    "venv",
    "*.egg-info",
];

const INDENT: &str = "    ";

#[derive(Debug, thiserror::Error)]
pub enum ProjectStructureError {
    #[error("Invalid ignore pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Not a directory: {path}")]
    NotADirectory { path: String },
}

/// Renders directory trees, skipping names that match the ignore globs.
#[derive(Debug, Clone)]
pub struct ProjectStructure {
    ignore: GlobSet,
}

impl ProjectStructure {
    /// Ignore exactly `patterns`, matched against file and directory names.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ProjectStructureError> {
        let invalid = |pattern: &str, e: globset::Error| ProjectStructureError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        };

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            builder.add(Glob::new(pattern).map_err(|e| invalid(pattern, e))?);
        }
        let ignore = builder.build().map_err(|e| invalid("<set>", e))?;

        Ok(Self { ignore })
    }

    pub fn with_default_ignores() -> Result<Self, ProjectStructureError> {
        Self::new(DEFAULT_IGNORE_PATTERNS)
    }

    fn is_ignored(&self, entry: &DirEntry) -> bool {
        self.ignore.is_match(entry.file_name())
    }

    /// Render the tree under `root`, one entry per line.
    ///
    /// Entries that cannot be read are skipped with a warning.
    pub fn render(&self, root: &Path) -> Result<String, ProjectStructureError> {
        if !root.is_dir() {
            return Err(ProjectStructureError::NotADirectory {
                path: root.display().to_string(),
            });
        }

        let walker = WalkDir::new(root)
            .sort_by(files_before_dirs)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.is_ignored(entry));

        let mut lines = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(error = %err, "Skipping unreadable entry");
                    continue;
                }
            };

            let indent = INDENT.repeat(entry.depth());
            if entry.file_type().is_dir() {
                lines.push(format!("{}{}/", indent, dir_name(&entry)));
            } else {
                lines.push(format!("{}{}", indent, entry.file_name().to_string_lossy()));
            }
        }

        tracing::debug!(root = %root.display(), entries = lines.len(), "Rendered project structure");
        Ok(lines.join("\n"))
    }
}

fn files_before_dirs(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// `.` and `..` have no file name, so the root falls back to its path.
fn dir_name(entry: &DirEntry) -> String {
    match entry.path().file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => entry.path().display().to_string(),
    }
}
