//! Configuration management for the Guichet pipeline.
//!
//! This module handles loading and merging configuration from multiple
//! sources, in increasing order of precedence:
//! - Built-in defaults
//! - Config file (guichet.yaml)
//! - Environment variables
//! - Command-line flags
//!
//! The configuration carries every tunable of the pipeline: backend
//! endpoint, pivot and hub languages, retrieval and generation knobs.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the Ollama generation backend
    pub ollama_url: String,

    /// Timeout for a single generation call, in seconds
    pub generation_timeout_secs: u64,

    /// Administrative language the pipeline normalizes into ("fr")
    pub pivot_language: String,

    /// Hub language translation falls back through when no direct
    /// pair resource exists ("en")
    pub hub_language: String,

    /// Language returned by the detector when text is undecidable.
    /// One process-wide default, applied uniformly.
    pub default_language: String,

    /// Number of documents retrieved per question
    pub top_n: usize,

    /// Per-document character budget when building generation context
    pub context_budget: usize,

    /// Number of trailing conversation turns forwarded to the backend
    pub history_window: usize,

    /// Sampling temperature for generation
    pub temperature: f32,

    /// Output token cap for generation
    pub max_tokens: u32,

    /// Ordered priority list of preferred generation models
    pub model_priority: Vec<String>,

    /// Model used for LLM-based translation
    pub translation_model: String,

    /// Path to the SQLite document database
    pub db_path: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure (guichet.yaml).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    ollama: Option<OllamaConfig>,
    pipeline: Option<PipelineConfig>,
    generation: Option<GenerationConfig>,
    translation: Option<TranslationConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OllamaConfig {
    endpoint: Option<String>,
    #[serde(rename = "timeoutSecs")]
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PipelineConfig {
    #[serde(rename = "pivotLanguage")]
    pivot_language: Option<String>,
    #[serde(rename = "hubLanguage")]
    hub_language: Option<String>,
    #[serde(rename = "defaultLanguage")]
    default_language: Option<String>,
    #[serde(rename = "topN")]
    top_n: Option<usize>,
    #[serde(rename = "contextBudget")]
    context_budget: Option<usize>,
    #[serde(rename = "historyWindow")]
    history_window: Option<usize>,
    database: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GenerationConfig {
    temperature: Option<f32>,
    #[serde(rename = "maxTokens")]
    max_tokens: Option<u32>,
    #[serde(rename = "modelPriority")]
    model_priority: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TranslationConfig {
    model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ollama_url: "http://localhost:11434".to_string(),
            generation_timeout_secs: 120,
            pivot_language: "fr".to_string(),
            hub_language: "en".to_string(),
            default_language: "fr".to_string(),
            top_n: 3,
            context_budget: 500,
            history_window: 6,
            temperature: 0.7,
            max_tokens: 1500,
            model_priority: vec![
                "aya-expanse:8b".to_string(),
                "command-r:7b".to_string(),
                "qwen2.5:7b".to_string(),
                "mistral:7b".to_string(),
            ],
            translation_model: "aya-expanse:8b".to_string(),
            db_path: PathBuf::from("guichet.db"),
            config_file: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file and environment variables.
    ///
    /// `config_file` is the caller-supplied path and wins over the
    /// `GUICHET_CONFIG` environment variable.
    ///
    /// Environment variables:
    /// - `GUICHET_CONFIG`: path to config file (default: guichet.yaml)
    /// - `GUICHET_OLLAMA_URL`: backend base URL
    /// - `GUICHET_DB`: SQLite document database path
    /// - `GUICHET_PIVOT_LANG`: administrative pivot language
    /// - `GUICHET_HUB_LANG`: translation hub language
    /// - `RUST_LOG`: log level
    /// - `NO_COLOR`: disable colored output
    pub fn load(config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        config.config_file = config_file.or_else(|| {
            std::env::var("GUICHET_CONFIG").ok().map(PathBuf::from)
        });

        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("guichet.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override the file
        if let Ok(url) = std::env::var("GUICHET_OLLAMA_URL") {
            config.ollama_url = url;
        }
        if let Ok(db) = std::env::var("GUICHET_DB") {
            config.db_path = PathBuf::from(db);
        }
        if let Ok(pivot) = std::env::var("GUICHET_PIVOT_LANG") {
            config.pivot_language = pivot;
        }
        if let Ok(hub) = std::env::var("GUICHET_HUB_LANG") {
            config.hub_language = hub;
        }

        config.log_level = std::env::var("RUST_LOG").ok().or(config.log_level);

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(ollama) = config_file.ollama {
            if let Some(endpoint) = ollama.endpoint {
                result.ollama_url = endpoint;
            }
            if let Some(timeout) = ollama.timeout_secs {
                result.generation_timeout_secs = timeout;
            }
        }

        if let Some(pipeline) = config_file.pipeline {
            if let Some(pivot) = pipeline.pivot_language {
                result.pivot_language = pivot;
            }
            if let Some(hub) = pipeline.hub_language {
                result.hub_language = hub;
            }
            if let Some(default) = pipeline.default_language {
                result.default_language = default;
            }
            if let Some(top_n) = pipeline.top_n {
                result.top_n = top_n;
            }
            if let Some(budget) = pipeline.context_budget {
                result.context_budget = budget;
            }
            if let Some(window) = pipeline.history_window {
                result.history_window = window;
            }
            if let Some(db) = pipeline.database {
                result.db_path = PathBuf::from(db);
            }
        }

        if let Some(generation) = config_file.generation {
            if let Some(temperature) = generation.temperature {
                result.temperature = temperature;
            }
            if let Some(max_tokens) = generation.max_tokens {
                result.max_tokens = max_tokens;
            }
            if let Some(priority) = generation.model_priority {
                result.model_priority = priority;
            }
        }

        if let Some(translation) = config_file.translation {
            if let Some(model) = translation.model {
                result.translation_model = model;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over both the config file and the
    /// environment.
    pub fn with_overrides(
        mut self,
        ollama_url: Option<String>,
        db_path: Option<PathBuf>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(ollama_url) = ollama_url {
            self.ollama_url = ollama_url;
        }

        if let Some(db_path) = db_path {
            self.db_path = db_path;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Generation call timeout as a [`Duration`].
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    /// Validate configuration invariants.
    pub fn validate(&self) -> AppResult<()> {
        if self.pivot_language.is_empty() {
            return Err(AppError::Config("Pivot language must not be empty".into()));
        }
        if self.hub_language.is_empty() {
            return Err(AppError::Config("Hub language must not be empty".into()));
        }
        if self.top_n == 0 {
            return Err(AppError::Config("topN must be at least 1".into()));
        }
        if self.model_priority.is_empty() {
            return Err(AppError::Config(
                "Model priority list must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.pivot_language, "fr");
        assert_eq!(config.hub_language, "en");
        assert_eq!(config.top_n, 3);
        assert_eq!(config.history_window, 6);
        assert_eq!(config.context_budget, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default().with_overrides(
            Some("http://ollama:11434".to_string()),
            Some(PathBuf::from("/tmp/docs.db")),
            None,
            true,
            false,
        );

        assert_eq!(config.ollama_url, "http://ollama:11434");
        assert_eq!(config.db_path, PathBuf::from("/tmp/docs.db"));
        assert!(config.verbose);
        assert_eq!(config.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_merge_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
ollama:
  endpoint: http://remote:11434
pipeline:
  pivotLanguage: fr
  hubLanguage: en
  topN: 5
generation:
  temperature: 0.2
  modelPriority:
    - mistral:7b
logging:
  level: debug
"#
        )
        .unwrap();

        let config = AppConfig::default()
            .merge_yaml(&file.path().to_path_buf())
            .unwrap();

        assert_eq!(config.ollama_url, "http://remote:11434");
        assert_eq!(config.top_n, 5);
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.model_priority, vec!["mistral:7b".to_string()]);
        assert_eq!(config.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_validate_rejects_empty_priority() {
        let mut config = AppConfig::default();
        config.model_priority.clear();
        assert!(config.validate().is_err());
    }
}
