//! Ask command handler.
//!
//! Builds the pipeline from configuration and runs one question
//! through it. The services are constructed here, once, and handed to
//! the pipeline by reference: no hidden module-level singletons.

use clap::Args;
use guichet_core::{AppConfig, AppError, AppResult};
use guichet_lang::{LanguageDetector, OllamaEngineProvider, TranslationService};
use guichet_llm::{ChatBackend, OllamaClient};
use guichet_pipeline::{AnswerGenerator, ConversationTurn, RagPipeline};
use guichet_retrieval::{KeywordRetriever, SqliteDocumentStore};
use std::path::PathBuf;
use std::sync::Arc;

/// Ask a question through the full pipeline
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Force the answer language (e.g. fr, ar, en); detected when omitted
    #[arg(short, long)]
    pub language: Option<String>,

    /// JSON file with prior conversation turns, oldest first
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Output the full result as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");

        let history = self.load_history()?;
        let pipeline = build_pipeline(config)?;

        let result = pipeline
            .retrieve_and_generate(&self.question, self.language.as_deref(), &history)
            .await;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", result.answer);
            if !result.sources.is_empty() {
                println!();
                println!("Sources:");
                for source in &result.sources {
                    println!("  - {} ({})", source.title, source.category);
                }
            }
        }

        Ok(())
    }

    /// Read prior turns from the history file, if any.
    fn load_history(&self) -> AppResult<Vec<ConversationTurn>> {
        let Some(ref path) = self.history else {
            return Ok(Vec::new());
        };

        let contents = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read history file: {}", e)))?;
        let turns: Vec<ConversationTurn> = serde_json::from_str(&contents)?;

        tracing::debug!("Loaded {} history turns", turns.len());
        Ok(turns)
    }
}

/// Wire the pipeline from configuration. This is the composition root:
/// one backend client shared by generation and translation, one
/// document store, all passed in explicitly.
fn build_pipeline(config: &AppConfig) -> AppResult<RagPipeline> {
    let backend: Arc<dyn ChatBackend> = Arc::new(
        OllamaClient::with_base_url(config.ollama_url.as_str())
            .with_chat_timeout(config.generation_timeout()),
    );

    let provider = Arc::new(OllamaEngineProvider::new(
        Arc::clone(&backend),
        config.translation_model.as_str(),
    ));
    let translator = Arc::new(TranslationService::new(
        provider,
        config.hub_language.as_str(),
    ));

    let store = Arc::new(SqliteDocumentStore::open(&config.db_path)?);
    let retriever = KeywordRetriever::new(store);

    let generator = AnswerGenerator::new(
        Arc::clone(&backend),
        config.model_priority.clone(),
        config.temperature,
        config.max_tokens,
        config.history_window,
    );

    Ok(RagPipeline::new(
        LanguageDetector::new(config.default_language.as_str()),
        translator,
        retriever,
        generator,
        config.pivot_language.as_str(),
        config.top_n,
        config.context_budget,
    ))
}
