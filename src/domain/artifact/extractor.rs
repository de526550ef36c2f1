//! Regex-based artifact extraction from model responses.
//!
//! Two independent passes over the response text:
//!
//! 1. Fenced blocks: every triple-backtick region, optionally tagged
//!    `markdown`, becomes a [`Artifact::MarkdownCodeBlock`].
//! 2. Heading sections: every `# heading` at the start of the text or of a
//!    line, with its body running to the next `\n# ` or the end of the text,
//!    becomes a [`Artifact::MarkdownSection`].
//!
//! All code blocks come first, then all sections, regardless of where they
//! appear in the source text.
//!
//! # Known limitation
//!
//! A section is dropped when its trimmed body occurs as a substring of any
//! code block. This suppresses markdown documents that are both fenced and
//! headed, but it also suppresses a short section that happens to occur
//! verbatim inside an unrelated fence, and a section with an empty body
//! whenever the response has at least one fence.

use once_cell::sync::Lazy;
use regex::Regex;

use super::artifact::Artifact;

static SHARED: Lazy<ArtifactExtractor> = Lazy::new(ArtifactExtractor::new);

/// Extracts [`Artifact`]s from a single response text.
#[derive(Debug, Clone)]
pub struct ArtifactExtractor {
    fenced_block_regex: Regex,
    heading_regex: Regex,
}

impl Default for ArtifactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactExtractor {
    /// Creates an extractor with precompiled regexes.
    pub fn new() -> Self {
        Self {
            // ```markdown ... ``` or ``` ... ```
            fenced_block_regex: Regex::new(r"```(?:markdown)?\s*([\s\S]*?)```").unwrap(),
            // "# Heading" at text start or right after a newline
            heading_regex: Regex::new(r"(?:\A|\n)# ([^\n]*)").unwrap(),
        }
    }

    /// Process-wide instance, compiled on first use.
    pub fn shared() -> &'static ArtifactExtractor {
        &SHARED
    }

    /// Run both passes and apply the substring deduplication rule.
    pub fn extract(&self, text: &str) -> Vec<Artifact> {
        let code_blocks: Vec<Artifact> = self
            .fenced_blocks(text)
            .into_iter()
            .enumerate()
            .map(|(i, block)| Artifact::code_block(block.trim(), i))
            .collect();

        let mut artifacts = code_blocks.clone();
        let mut dropped = 0usize;

        for (i, (heading, body)) in self.heading_sections(text).into_iter().enumerate() {
            let body = body.trim();
            if code_blocks.iter().any(|block| block.content().contains(body)) {
                dropped += 1;
                continue;
            }
            let heading = heading.trim();
            artifacts.push(Artifact::section(
                heading,
                format!("# {}\n\n{}", heading, body),
                i,
            ));
        }

        tracing::debug!(
            code_blocks = code_blocks.len(),
            sections = artifacts.len() - code_blocks.len(),
            dropped,
            "Extracted artifacts"
        );

        artifacts
    }

    /// Raw inner text of every fence, in order of appearance.
    fn fenced_blocks<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.fenced_block_regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect()
    }

    /// `(heading, body)` pairs, in order of appearance.
    ///
    /// The body starts after the heading line and stops before the next
    /// `"\n# "`, which is also where the search for the next heading resumes.
    fn heading_sections<'a>(&self, text: &'a str) -> Vec<(&'a str, &'a str)> {
        let mut sections = Vec::new();
        let mut pos = 0;

        while let Some(caps) = self.heading_regex.captures_at(text, pos) {
            let (Some(line), Some(heading)) = (caps.get(0), caps.get(1)) else {
                break;
            };

            // Skip the newline that terminates the heading line, if any.
            let body_start = if line.end() < text.len() {
                line.end() + 1
            } else {
                line.end()
            };
            let body_end = text[body_start..]
                .find("\n# ")
                .map_or(text.len(), |offset| body_start + offset);

            sections.push((heading.as_str(), &text[body_start..body_end]));
            pos = body_end;
        }

        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::artifact::ArtifactKind;

    fn extract(text: &str) -> Vec<Artifact> {
        ArtifactExtractor::new().extract(text)
    }

    #[test]
    fn fenced_block_and_unrelated_section_are_both_kept() {
        let artifacts = extract("```markdown\nA\n```\n# B\nC");

        assert_eq!(
            artifacts,
            vec![
                Artifact::code_block("A", 0),
                Artifact::section("B", "# B\n\nC", 0),
            ]
        );
    }

    #[test]
    fn section_whose_body_is_inside_a_fence_is_dropped() {
        let artifacts = extract("```markdown\nA C\n```\n# B\nC");

        assert_eq!(artifacts, vec![Artifact::code_block("A C", 0)]);
    }

    #[test]
    fn untagged_fence_is_extracted() {
        let artifacts = extract("Here you go:\n```\nfn main() {}\n```\nDone.");
        assert_eq!(artifacts, vec![Artifact::code_block("fn main() {}", 0)]);
    }

    #[test]
    fn multiple_sections_split_on_level_one_headings() {
        let artifacts = extract("# Intro\nHello there\n# Usage\nRun it\n");

        assert_eq!(
            artifacts,
            vec![
                Artifact::section("Intro", "# Intro\n\nHello there", 0),
                Artifact::section("Usage", "# Usage\n\nRun it", 1),
            ]
        );
    }

    #[test]
    fn subheadings_stay_inside_their_section() {
        let artifacts = extract("# Guide\nIntro\n## Details\nMore");

        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].content(), "# Guide\n\nIntro\n## Details\nMore");
    }

    #[test]
    fn code_blocks_precede_sections_regardless_of_position() {
        let artifacts = extract("# Title\nbody text\n```\ncode here\n```");

        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].kind(), ArtifactKind::MarkdownCodeBlock);
        assert_eq!(artifacts[0].content(), "code here");
        assert_eq!(artifacts[1].kind(), ArtifactKind::MarkdownSection);
        assert_eq!(artifacts[1].heading(), Some("Title"));
    }

    #[test]
    fn indices_are_numbered_per_pass() {
        let artifacts = extract("```\none\n```\n```\ntwo\n```\n# First\nalpha\n# Second\nbeta");

        let indices: Vec<(ArtifactKind, usize)> =
            artifacts.iter().map(|a| (a.kind(), a.index())).collect();
        assert_eq!(
            indices,
            vec![
                (ArtifactKind::MarkdownCodeBlock, 0),
                (ArtifactKind::MarkdownCodeBlock, 1),
                (ArtifactKind::MarkdownSection, 0),
                (ArtifactKind::MarkdownSection, 1),
            ]
        );
    }

    #[test]
    fn dropped_section_still_consumes_its_index() {
        let artifacts = extract("```\nshared\n```\n# One\nshared\n# Two\nunique");

        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[1].heading(), Some("Two"));
        assert_eq!(artifacts[1].index(), 1);
    }

    #[test]
    fn short_body_inside_unrelated_fence_is_suppressed() {
        let artifacts = extract("```\nThe quick brown fox jumps\n```\n# Note\nfox");
        assert_eq!(artifacts.len(), 1);
    }

    #[test]
    fn empty_section_body_is_suppressed_when_any_fence_exists() {
        assert_eq!(extract("```\nx\n```\n# Empty\n").len(), 1);
        assert_eq!(
            extract("# Empty\n"),
            vec![Artifact::section("Empty", "# Empty\n\n", 0)]
        );
    }

    #[test]
    fn plain_text_yields_nothing() {
        assert!(extract("Just a plain answer without markdown.").is_empty());
        assert!(extract("").is_empty());
    }

    #[test]
    fn deeper_headings_and_missing_space_are_not_sections() {
        assert!(extract("## Only a subheading\ntext").is_empty());
        assert!(extract("#hashtag\ntext").is_empty());
    }

    #[test]
    fn heading_text_is_trimmed() {
        let artifacts = extract("#   Spaced Out   \nbody");
        assert_eq!(artifacts[0].heading(), Some("Spaced Out"));
        assert_eq!(artifacts[0].content(), "# Spaced Out\n\nbody");
    }
}
