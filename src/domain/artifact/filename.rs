//! Export file names for artifacts.
//!
//! Pure naming rules. Checking candidates against the disk is the exporter's
//! job; see `adapters::export::LocalArtifactExporter`.

use super::artifact::Artifact;

/// Extension of every exported artifact file.
pub const ARTIFACT_EXTENSION: &str = "md";

/// Derive the collision-free-before-suffixing base name of an artifact.
///
/// Sections use their heading with everything but alphanumerics, spaces,
/// `-` and `_` discarded, spaces turned into `_`, lowercased. Code blocks, and
/// sections whose heading has nothing left after cleaning, use
/// `artifact_<index>`.
pub fn base_name(artifact: &Artifact) -> String {
    artifact
        .heading()
        .map(sanitize_heading)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("artifact_{}", artifact.index()))
}

/// Candidate file name for a given collision attempt.
///
/// Attempt 0 is `base.md`, attempt n is `base_n.md`.
pub fn candidate_file_name(base: &str, attempt: usize) -> String {
    if attempt == 0 {
        format!("{}.{}", base, ARTIFACT_EXTENSION)
    } else {
        format!("{}_{}.{}", base, attempt, ARTIFACT_EXTENSION)
    }
}

fn sanitize_heading(heading: &str) -> String {
    heading
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_heading_becomes_snake_case_name() {
        let artifact = Artifact::section("Project Setup Guide", "...", 0);
        assert_eq!(base_name(&artifact), "project_setup_guide");
    }

    #[test]
    fn punctuation_is_discarded_not_replaced() {
        let artifact = Artifact::section("What's next? (v2.0)", "...", 0);
        assert_eq!(base_name(&artifact), "whats_next_v20");
    }

    #[test]
    fn hyphens_and_underscores_survive() {
        let artifact = Artifact::section("pre-flight check_list", "...", 0);
        assert_eq!(base_name(&artifact), "pre-flight_check_list");
    }

    #[test]
    fn unicode_letters_are_kept() {
        let artifact = Artifact::section("Über Café", "...", 0);
        assert_eq!(base_name(&artifact), "über_café");
    }

    #[test]
    fn code_block_uses_index_name() {
        let artifact = Artifact::code_block("fn main() {}", 4);
        assert_eq!(base_name(&artifact), "artifact_4");
    }

    #[test]
    fn heading_with_nothing_usable_falls_back_to_index_name() {
        let artifact = Artifact::section("!!!", "...", 2);
        assert_eq!(base_name(&artifact), "artifact_2");
    }

    #[test]
    fn candidates_count_up_from_unsuffixed() {
        assert_eq!(candidate_file_name("notes", 0), "notes.md");
        assert_eq!(candidate_file_name("notes", 1), "notes_1.md");
        assert_eq!(candidate_file_name("notes", 2), "notes_2.md");
    }
}
