//! Detect command handler.
//!
//! Standalone language probe, useful before any persistence decision.

use clap::Args;
use guichet_core::{AppConfig, AppResult};
use guichet_lang::LanguageDetector;

/// Detect the language of a text
#[derive(Args, Debug)]
pub struct DetectCommand {
    /// The text to probe
    pub text: String,
}

impl DetectCommand {
    /// Execute the detect command.
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let detector = LanguageDetector::new(config.default_language.as_str());
        println!("{}", detector.detect(&self.text));
        Ok(())
    }
}
