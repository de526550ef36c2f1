//! Artifact value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A unit of markdown content extracted from one model response.
///
/// `index` is the discovery ordinal within the extraction pass that produced
/// the artifact. Code blocks and sections are numbered independently, so the
/// same index can appear once per kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Artifact {
    /// Content of a triple-backtick fence.
    MarkdownCodeBlock { content: String, index: usize },
    /// A `# heading` and the text up to the next heading.
    MarkdownSection {
        heading: String,
        content: String,
        index: usize,
    },
}

/// Discriminant of [`Artifact`], for display and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    MarkdownCodeBlock,
    MarkdownSection,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArtifactKind::MarkdownCodeBlock => "markdown_code_block",
            ArtifactKind::MarkdownSection => "markdown_section",
        };
        write!(f, "{}", s)
    }
}

impl Artifact {
    pub fn code_block(content: impl Into<String>, index: usize) -> Self {
        Artifact::MarkdownCodeBlock {
            content: content.into(),
            index,
        }
    }

    pub fn section(heading: impl Into<String>, content: impl Into<String>, index: usize) -> Self {
        Artifact::MarkdownSection {
            heading: heading.into(),
            content: content.into(),
            index,
        }
    }

    pub fn kind(&self) -> ArtifactKind {
        match self {
            Artifact::MarkdownCodeBlock { .. } => ArtifactKind::MarkdownCodeBlock,
            Artifact::MarkdownSection { .. } => ArtifactKind::MarkdownSection,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Artifact::MarkdownCodeBlock { content, .. } => content,
            Artifact::MarkdownSection { content, .. } => content,
        }
    }

    /// Present only for sections.
    pub fn heading(&self) -> Option<&str> {
        match self {
            Artifact::MarkdownCodeBlock { .. } => None,
            Artifact::MarkdownSection { heading, .. } => Some(heading),
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Artifact::MarkdownCodeBlock { index, .. } => *index,
            Artifact::MarkdownSection { index, .. } => *index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn code_block_has_no_heading() {
        let artifact = Artifact::code_block("let x = 1;", 0);
        assert_eq!(artifact.kind(), ArtifactKind::MarkdownCodeBlock);
        assert_eq!(artifact.heading(), None);
        assert_eq!(artifact.content(), "let x = 1;");
    }

    #[test]
    fn section_exposes_heading_and_index() {
        let artifact = Artifact::section("Setup", "# Setup\n\nInstall it.", 3);
        assert_eq!(artifact.kind(), ArtifactKind::MarkdownSection);
        assert_eq!(artifact.heading(), Some("Setup"));
        assert_eq!(artifact.index(), 3);
    }

    #[test]
    fn serializes_with_type_tag() {
        let value = serde_json::to_value(Artifact::section("Plan", "# Plan\n\nShip", 1)).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "markdown_section",
                "heading": "Plan",
                "content": "# Plan\n\nShip",
                "index": 1
            })
        );

        let value = serde_json::to_value(Artifact::code_block("body", 0)).unwrap();
        assert_eq!(value["type"], "markdown_code_block");
        assert!(value.get("heading").is_none());
    }

    #[test]
    fn kind_displays_wire_name() {
        assert_eq!(ArtifactKind::MarkdownSection.to_string(), "markdown_section");
    }
}
