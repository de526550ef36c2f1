//! FileSharing - embeds local files into a prompt and asks about them.

use std::path::Path;
use std::sync::Arc;

use tokio::fs;

use crate::domain::conversation::ConversationState;
use crate::ports::AIProvider;

use super::assistant::{AskOptions, AskResult, Assistant, AssistantError};

pub const DEFAULT_SHARE_PREFIX: &str = "Please review these files:";

const TRUNCATION_MARKER: &str = "\n...(truncated)...";

/// Shares file contents with the model as part of a normal exchange.
pub struct FileSharing<P: ?Sized + AIProvider> {
    assistant: Arc<Assistant<P>>,
    /// Per-file character limit; `None` embeds files whole.
    max_file_chars: Option<usize>,
}

impl<P: ?Sized + AIProvider> FileSharing<P> {
    pub fn new(assistant: Arc<Assistant<P>>) -> Self {
        Self {
            assistant,
            max_file_chars: None,
        }
    }

    pub fn with_max_file_chars(mut self, max_chars: usize) -> Self {
        self.max_file_chars = Some(max_chars);
        self
    }

    /// Embed each file, track it in the shared-file ledger, then ask.
    ///
    /// An unreadable file does not fail the request; its read error is
    /// embedded in place of the content.
    pub async fn share_files<F: AsRef<Path>>(
        &self,
        state: &mut ConversationState,
        paths: &[F],
        prompt_prefix: &str,
        prompt_suffix: &str,
    ) -> Result<AskResult, AssistantError> {
        let mut prompt = format!("{}\n\n", prompt_prefix);

        for path in paths {
            let path = path.as_ref();
            prompt.push_str(&self.embed_file(path).await);
            state.track_shared_file(path.display().to_string());
        }

        prompt.push('\n');
        prompt.push_str(prompt_suffix);

        tracing::info!(files = paths.len(), "Sharing files");

        self.assistant
            .ask(state, &prompt, AskOptions::default())
            .await
    }

    async fn embed_file(&self, path: &Path) -> String {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Could not read shared file");
                format!("Error reading file: {}", e)
            }
        };

        format_file_block(&path.display().to_string(), &content, self.max_file_chars)
    }
}

/// Wrap file content in the `<file>` envelope the model sees.
pub fn format_file_block(path: &str, content: &str, max_chars: Option<usize>) -> String {
    let body = match max_chars {
        Some(max) if content.chars().count() > max => {
            let kept: String = content.chars().take(max).collect();
            format!("{}{}", kept, TRUNCATION_MARKER)
        }
        _ => content.to_string(),
    };

    format!("\n<file path=\"{}\">\n```\n{}\n```\n</file>\n", path, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use tempfile::TempDir;

    fn sharing(mock: &MockAIProvider) -> FileSharing<MockAIProvider> {
        FileSharing::new(Arc::new(Assistant::new(Arc::new(mock.clone()))))
    }

    #[test]
    fn file_block_envelope() {
        assert_eq!(
            format_file_block("a.rs", "fn main() {}", None),
            "\n<file path=\"a.rs\">\n```\nfn main() {}\n```\n</file>\n"
        );
    }

    #[test]
    fn file_block_truncates_by_characters() {
        let block = format_file_block("f", "héllo world", Some(5));
        assert!(block.contains("```\nhéllo\n...(truncated)...\n```"));

        let untouched = format_file_block("f", "short", Some(5));
        assert!(!untouched.contains("truncated"));
    }

    #[tokio::test]
    async fn shares_files_and_tracks_paths() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("notes.md");
        std::fs::write(&file, "# Notes\nremember").unwrap();

        let mock = MockAIProvider::new().with_response("Looks good");
        let mut state = ConversationState::new();

        let result = sharing(&mock)
            .share_files(&mut state, &[&file, &file], DEFAULT_SHARE_PREFIX, "Any issues?")
            .await
            .unwrap();

        assert_eq!(result.content, "Looks good");
        assert_eq!(state.shared_files(), [file.display().to_string()]);

        let sent = mock.last_prompt().unwrap();
        assert!(sent.starts_with("Please review these files:\n\n"));
        assert!(sent.contains("# Notes\nremember"));
        assert!(sent.ends_with("\nAny issues?"));
    }

    #[tokio::test]
    async fn unreadable_file_is_embedded_as_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.txt");

        let mock = MockAIProvider::new();
        let mut state = ConversationState::new();

        sharing(&mock)
            .share_files(&mut state, &[&missing], DEFAULT_SHARE_PREFIX, "")
            .await
            .unwrap();

        assert!(mock.last_prompt().unwrap().contains("Error reading file: "));
        assert_eq!(state.shared_files().len(), 1);
        assert_eq!(state.message_count(), 2);
    }
}
