//! Translation engines and their provider.
//!
//! An engine is bound to a single language pair; the provider knows
//! which pairs exist and performs the expensive per-pair resource
//! acquisition. The provided implementation translates through an
//! instruction prompt against the chat backend, so any pair of
//! supported languages has a direct path as long as the translation
//! model is installed.

use guichet_core::{AppError, AppResult};
use guichet_llm::{ChatBackend, ChatMessage, ChatRequest};
use std::fmt;
use std::sync::Arc;

/// Languages the Ollama-backed provider will translate between.
pub const SUPPORTED_LANGUAGES: &[&str] = &["fr", "ar", "en", "es", "de", "it", "pt"];

/// An ordered language pair, the cache key for translation resources.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LangPair {
    pub source: String,
    pub target: String,
}

impl LangPair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for LangPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.source, self.target)
    }
}

/// A translation resource bound to one language pair.
#[async_trait::async_trait]
pub trait TranslationEngine: Send + Sync {
    /// Translate `text` along this engine's pair.
    async fn translate(&self, text: &str) -> AppResult<String>;
}

/// Factory for translation engines.
///
/// `load` is the expensive acquisition step; the translation service
/// caches its result so it runs at most once per pair.
#[async_trait::async_trait]
pub trait EngineProvider: Send + Sync {
    /// Get the provider name.
    fn provider_name(&self) -> &str;

    /// Check whether a direct resource exists for the pair.
    fn supports(&self, pair: &LangPair) -> bool;

    /// Acquire the engine for a pair. Errors mean "no direct path".
    async fn load(&self, pair: &LangPair) -> AppResult<Arc<dyn TranslationEngine>>;
}

/// English name of a language code, for instruction prompts.
fn language_name(code: &str) -> &str {
    match code {
        "fr" => "French",
        "ar" => "Arabic",
        "en" => "English",
        "es" => "Spanish",
        "de" => "German",
        "it" => "Italian",
        "pt" => "Portuguese",
        other => other,
    }
}

/// LLM-prompted translation engine over the chat backend.
struct OllamaTranslationEngine {
    backend: Arc<dyn ChatBackend>,
    model: String,
    instruction: String,
}

#[async_trait::async_trait]
impl TranslationEngine for OllamaTranslationEngine {
    async fn translate(&self, text: &str) -> AppResult<String> {
        let request = ChatRequest::new(
            self.model.clone(),
            vec![
                ChatMessage::system(self.instruction.clone()),
                ChatMessage::user(text),
            ],
        )
        // Translation wants fidelity, not creativity
        .with_temperature(0.1);

        let translated = self.backend.chat(&request).await?;
        let translated = translated.trim().to_string();

        if translated.is_empty() {
            return Err(AppError::Translation(
                "Backend returned an empty translation".to_string(),
            ));
        }

        Ok(translated)
    }
}

/// Provider of Ollama-backed translation engines.
///
/// Loading a pair verifies the translation model is installed on the
/// backend; that model listing round-trip is the once-per-pair resource
/// acquisition cost.
pub struct OllamaEngineProvider {
    backend: Arc<dyn ChatBackend>,
    model: String,
}

impl OllamaEngineProvider {
    pub fn new(backend: Arc<dyn ChatBackend>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }
}

#[async_trait::async_trait]
impl EngineProvider for OllamaEngineProvider {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    fn supports(&self, pair: &LangPair) -> bool {
        pair.source != pair.target
            && SUPPORTED_LANGUAGES.contains(&pair.source.as_str())
            && SUPPORTED_LANGUAGES.contains(&pair.target.as_str())
    }

    async fn load(&self, pair: &LangPair) -> AppResult<Arc<dyn TranslationEngine>> {
        tracing::info!("Loading translation engine for pair {}", pair);

        let models = self.backend.list_models().await?;
        let base = self.model.split(':').next().unwrap_or(&self.model);
        let installed = models
            .iter()
            .any(|m| m == &self.model || m.starts_with(base));

        if !installed {
            return Err(AppError::Translation(format!(
                "Translation model '{}' is not installed on the backend",
                self.model
            )));
        }

        let instruction = format!(
            "You are a professional translation engine. Translate the user's text from {} to {}. \
             Preserve meaning, names and numbers. Output only the translation, with no commentary.",
            language_name(&pair.source),
            language_name(&pair.target)
        );

        Ok(Arc::new(OllamaTranslationEngine {
            backend: Arc::clone(&self.backend),
            model: self.model.clone(),
            instruction,
        }))
    }
}
