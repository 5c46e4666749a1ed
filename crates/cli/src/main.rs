//! Guichet CLI
//!
//! Entry point for the citizen administrative assistant. Acts as the
//! composition root: loads configuration, initializes logging, builds
//! the pipeline services once and routes to the command handlers.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, DetectCommand, SeedCommand};
use guichet_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Guichet - multilingual assistant for administrative procedures
#[derive(Parser, Debug)]
#[command(name = "guichet")]
#[command(about = "Multilingual RAG assistant for administrative procedures", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file (default: guichet.yaml)
    #[arg(short, long, global = true, env = "GUICHET_CONFIG")]
    config: Option<PathBuf>,

    /// Base URL of the Ollama backend
    #[arg(long, global = true, env = "GUICHET_OLLAMA_URL")]
    ollama_url: Option<String>,

    /// Path to the SQLite document database
    #[arg(long, global = true, env = "GUICHET_DB")]
    db: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask a question through the full pipeline
    Ask(AskCommand),

    /// Detect the language of a text
    Detect(DetectCommand),

    /// Seed the document database with the sample corpus
    Seed(SeedCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config)?.with_overrides(
        cli.ollama_url,
        cli.db,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;
    config.validate()?;

    tracing::info!("Guichet starting");
    tracing::debug!("Backend: {}", config.ollama_url);
    tracing::debug!("Documents: {:?}", config.db_path);

    let command_name = match &cli.command {
        Commands::Ask(_) => "ask",
        Commands::Detect(_) => "detect",
        Commands::Seed(_) => "seed",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Detect(cmd) => cmd.execute(&config),
        Commands::Seed(cmd) => cmd.execute(&config),
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
