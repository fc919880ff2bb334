//! Command line entry point.
//!
//! Wires configuration, logging and the Redis conversation store into the
//! library. `analyze` replays a recorded model reply through the mock
//! provider. Results go to stdout, logs to stderr.

use std::error::Error;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use turn_annotator::adapters::ai::MockCompletionProvider;
use turn_annotator::adapters::storage::RedisConversationStore;
use turn_annotator::application::{ConversationManager, ConversationSettings, TurnAnalyzer};
use turn_annotator::config::{AppConfig, LogFormat, LoggingConfig};
use turn_annotator::domain::annotation::AnnotationParser;
use turn_annotator::domain::conversation::RecentTurnsStrategy;
use turn_annotator::domain::foundation::CustomerId;

#[derive(Parser)]
#[command(name = "turn-annotator")]
#[command(about = "Structured annotation of conversational turns", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a customer message and print the prompt context for it
    Context {
        customer_id: CustomerId,
        text: String,
    },
    /// Record an assistant reply
    Reply {
        customer_id: CustomerId,
        text: String,
    },
    /// Print the stored history as JSON
    History {
        customer_id: CustomerId,

        /// Print the rendered context of the last N messages instead
        #[arg(short = 'n', long)]
        max_turns: Option<usize>,
    },
    /// Analyze a customer message against a recorded model reply
    Analyze {
        customer_id: CustomerId,
        text: String,

        /// Model reply to replay; a canned annotation when omitted
        #[arg(short, long)]
        reply: Option<PathBuf>,
    },
    /// Delete the stored history
    Clear { customer_id: CustomerId },
    /// Parse a model payload and print the structured result as JSON
    Parse {
        /// Payload file; stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging)?;

    if let Commands::Parse { input } = &cli.command {
        let parser = AnnotationParser::new(config.parser.delimiters(), config.parser.limits());
        let payload = read_payload(input.as_ref())?;
        let result = parser.parse(&payload);
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let store = RedisConversationStore::connect(&config.redis).await?;
    let manager = Arc::new(ConversationManager::new(
        Arc::new(store),
        ConversationSettings::from(&config.conversation),
    ));

    match cli.command {
        Commands::Context { customer_id, text } => {
            let prompt = manager.record_and_build_context(&customer_id, &text).await?;
            println!("{prompt}");
        }
        Commands::Reply { customer_id, text } => {
            manager.record_reply(&customer_id, &text).await?;
            info!(%customer_id, "Recorded reply");
        }
        Commands::History {
            customer_id,
            max_turns: Some(max_turns),
        } => {
            let strategy = RecentTurnsStrategy::new(max_turns);
            let context = manager.build_context_with(&customer_id, &strategy).await?;
            println!("{context}");
        }
        Commands::History {
            customer_id,
            max_turns: None,
        } => {
            let history = manager.get_history(&customer_id).await?;
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
        Commands::Analyze {
            customer_id,
            text,
            reply,
        } => {
            let provider = match reply {
                Some(path) => {
                    MockCompletionProvider::new().with_response(read_payload(Some(&path))?)
                }
                None => MockCompletionProvider::new(),
            };
            let analyzer = TurnAnalyzer::from_config(manager, Arc::new(provider), &config);
            let result = analyzer.analyze_turn(&customer_id, &text).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Clear { customer_id } => {
            manager.clear_history(&customer_id).await?;
        }
        Commands::Parse { .. } => {}
    }

    Ok(())
}

fn init_tracing(config: &LoggingConfig) -> Result<(), Box<dyn Error>> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.env_filter()?)
        .with_writer(std::io::stderr);

    match config.format {
        LogFormat::Pretty => tracing::subscriber::set_global_default(builder.finish())?,
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
    }
    Ok(())
}

/// Reads the payload, replacing invalid UTF-8 with U+FFFD so the decoder
/// can reject the affected records individually.
fn read_payload(input: Option<&PathBuf>) -> std::io::Result<String> {
    let bytes = match input {
        Some(path) => std::fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
