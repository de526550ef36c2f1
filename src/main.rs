use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use artifact_harness::adapters::ai::{AnthropicConfig, AnthropicProvider};
use artifact_harness::adapters::{FileDocumentStore, FileStateStorage, LocalArtifactExporter};
use artifact_harness::application::{
    AskOptions, AskResult, Assistant, ArtifactArchive, FileSharing, ProjectStructure, Summarizer,
    SummaryOutcome, DEFAULT_SHARE_PREFIX,
};
use artifact_harness::config::AppConfig;
use artifact_harness::domain::artifact::ArtifactExtractor;
use artifact_harness::domain::conversation::ConversationState;
use artifact_harness::ports::{AIProvider, StateStorage};

#[derive(Parser)]
#[command(name = "artifact-harness")]
#[command(version, about = "Ask a hosted model, keep conversation state, extract markdown artifacts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Conversation state file (overrides configuration)
    #[arg(long, global = true)]
    state_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a prompt with conversation context
    Ask {
        prompt: String,

        /// Leave recent messages out of the prompt
        #[arg(long)]
        no_history: bool,

        /// Leave the running summary out of the prompt
        #[arg(long)]
        no_summary: bool,

        /// Response budget for this request
        #[arg(long)]
        max_tokens: Option<u32>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Embed files in a prompt and ask about them
    Share {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[arg(long, default_value = DEFAULT_SHARE_PREFIX)]
        prefix: String,

        #[arg(long, default_value = "")]
        suffix: String,

        /// Truncate each file to this many characters
        #[arg(long)]
        max_chars: Option<usize>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Replace the running summary with a fresh one
    Summarize,

    /// Print an indented tree of a project directory
    Structure {
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Glob to skip (repeatable); replaces the default ignore list
        #[arg(long = "ignore")]
        ignore: Vec<String>,
    },

    /// List recently archived conversations
    Recent {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Search archived artifacts by content
    Search {
        term: String,

        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Write extracted artifacts as markdown files
    #[arg(long)]
    export: bool,

    /// Store the exchange and its artifacts in the document store
    #[arg(long)]
    archive: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if let Some(state_file) = cli.state_file {
        config.storage.state_file = state_file;
    }
    config.validate().context("Invalid configuration")?;

    let default_filter = if cli.verbose {
        "debug".to_string()
    } else {
        config.log_level.clone()
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if config.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let archive = ArtifactArchive::new(Arc::new(FileDocumentStore::new(
        &config.storage.document_store_dir,
    )));

    match cli.command {
        Commands::Structure { root, ignore } => {
            let structure = if ignore.is_empty() {
                ProjectStructure::with_default_ignores()?
            } else {
                ProjectStructure::new(ignore.as_slice())?
            };
            println!("{}", structure.render(&root)?);
        }
        Commands::Recent { limit } => {
            for conversation in archive.list_recent_conversations(limit).await? {
                println!(
                    "{}  {}  {}",
                    conversation.created_at.to_rfc3339(),
                    conversation.id,
                    first_line(&conversation.prompt)
                );
            }
        }
        Commands::Search { term, limit } => {
            for found in archive.search_artifacts_by_content(&term, limit).await? {
                println!(
                    "{}/{}  [{}]  {}",
                    found.conversation_id,
                    found.id,
                    found.artifact.kind(),
                    first_line(found.artifact.content())
                );
            }
        }
        Commands::Ask {
            prompt,
            no_history,
            no_summary,
            max_tokens,
            output,
        } => {
            let session = Session::open(&config).await?;
            let options = AskOptions {
                include_history: !no_history,
                include_summary: !no_summary,
                max_tokens,
            };
            let mut state = session.state;
            let result = session.assistant.ask(&mut state, &prompt, options).await?;
            session.storage.save_state(&state).await?;

            println!("{}", result.content);
            handle_artifacts(&config, &archive, &prompt, &result, &output).await?;
        }
        Commands::Share {
            files,
            prefix,
            suffix,
            max_chars,
            output,
        } => {
            let session = Session::open(&config).await?;
            let mut sharing = FileSharing::new(session.assistant.clone());
            if let Some(max_chars) = max_chars {
                sharing = sharing.with_max_file_chars(max_chars);
            }
            let mut state = session.state;
            let result = sharing
                .share_files(&mut state, &files, &prefix, &suffix)
                .await?;
            session.storage.save_state(&state).await?;

            println!("{}", result.content);
            let prompt = state.last_prompt().unwrap_or_default().to_string();
            handle_artifacts(&config, &archive, &prompt, &result, &output).await?;
        }
        Commands::Summarize => {
            let session = Session::open(&config).await?;
            let mut state = session.state;
            match Summarizer::new(session.assistant.clone())
                .summarize(&mut state)
                .await?
            {
                SummaryOutcome::Updated(summary) => {
                    session.storage.save_state(&state).await?;
                    println!("{}", summary);
                }
                SummaryOutcome::NothingToSummarize => {
                    println!("Not enough conversation to summarize.")
                }
            }
        }
    }

    Ok(())
}

/// Everything a model-facing command needs: provider, assistant and state.
struct Session {
    assistant: Arc<Assistant<AnthropicProvider>>,
    storage: FileStateStorage,
    state: ConversationState,
}

impl Session {
    async fn open(config: &AppConfig) -> Result<Self> {
        let credentials = config.ai.resolve_credentials()?;
        let mut anthropic = AnthropicConfig::from_secret(credentials.api_key)
            .with_base_url(&config.ai.base_url)
            .with_timeout(config.ai.timeout())
            .with_max_retries(config.ai.max_retries);
        if let Some(model) = credentials.model {
            anthropic = anthropic.with_model(model);
        }
        let provider = Arc::new(AnthropicProvider::new(anthropic)?);
        let info = provider.provider_info();
        tracing::info!(provider = %info.name, model = %info.model, "Model provider ready");
        let assistant =
            Arc::new(Assistant::new(provider).with_default_max_tokens(config.ai.max_tokens));

        let storage = FileStateStorage::new(&config.storage.state_file);
        let outcome = storage.load_state().await?;
        tracing::debug!(
            path = %storage.path().display(),
            format = ?storage.format(),
            found = outcome.was_found(),
            "Conversation state ready"
        );
        let state = outcome.into_state();

        Ok(Self {
            assistant,
            storage,
            state,
        })
    }
}

async fn handle_artifacts(
    config: &AppConfig,
    archive: &ArtifactArchive,
    prompt: &str,
    result: &AskResult,
    output: &OutputArgs,
) -> Result<()> {
    let artifacts = ArtifactExtractor::shared().extract(&result.content);
    tracing::info!(count = artifacts.len(), "Extracted artifacts");

    if output.export && !artifacts.is_empty() {
        let exporter = LocalArtifactExporter::new(&config.storage.export_dir);
        for path in exporter.export_all(&artifacts).await? {
            eprintln!("saved {}", path.display());
        }
    }

    if output.archive {
        let response = serde_json::json!({
            "id": result.message_id,
            "model": result.model,
            "content": [{"type": "text", "text": result.content}],
        });
        let conversation_id = archive
            .save_conversation(prompt, response, Some(result.message_id.clone()))
            .await?;
        archive.save_artifacts(&conversation_id, &artifacts).await?;
        eprintln!("archived conversation {}", conversation_id);
    }

    Ok(())
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}
