//! Language crate for the Guichet pipeline.
//!
//! Two concerns live here:
//! - Best-effort language detection ([`LanguageDetector`])
//! - Cross-lingual normalization with cached per-pair engines
//!   ([`TranslationService`]), including the hub-language fallback chain
//!   and the fail-open terminal behavior.

pub mod detect;
pub mod engine;
pub mod translate;

pub use detect::LanguageDetector;
pub use engine::{
    EngineProvider, LangPair, OllamaEngineProvider, TranslationEngine, SUPPORTED_LANGUAGES,
};
pub use translate::TranslationService;
