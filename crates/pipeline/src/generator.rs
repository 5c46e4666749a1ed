//! Answer generation with backend model selection and fallback.
//!
//! The generator owns the interaction with the chat backend: it picks
//! the model once per instance from a priority list, assembles the
//! system/history/user message sequence, and degrades to a fixed
//! language-specific fallback message on any failure. `generate` never
//! errors.

use guichet_llm::{ChatBackend, ChatRequest};
use guichet_prompt::{
    assemble_messages, build_user_prompt, fallback_message, system_instruction, ConversationTurn,
};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Conversational answer generator over a chat backend.
pub struct AnswerGenerator {
    backend: Arc<dyn ChatBackend>,
    model_priority: Vec<String>,
    temperature: f32,
    max_tokens: u32,
    history_window: usize,
    /// Model picked on first use; `None` inside means the backend has
    /// no usable model and the generator is unavailable.
    selected_model: OnceCell<Option<String>>,
}

impl AnswerGenerator {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        model_priority: Vec<String>,
        temperature: f32,
        max_tokens: u32,
        history_window: usize,
    ) -> Self {
        Self {
            backend,
            model_priority,
            temperature,
            max_tokens,
            history_window,
            selected_model: OnceCell::new(),
        }
    }

    /// Model used for generation, selected at most once per instance.
    pub async fn selected_model(&self) -> Option<String> {
        self.selected_model
            .get_or_init(|| self.select_model())
            .await
            .clone()
    }

    /// Walk the priority list against the backend's installed models.
    async fn select_model(&self) -> Option<String> {
        if !self.backend.is_available().await {
            tracing::warn!("Generation backend is not reachable");
            return None;
        }

        let installed = match self.backend.list_models().await {
            Ok(models) => models,
            Err(e) => {
                tracing::warn!("Failed to list backend models: {}", e);
                return None;
            }
        };

        for preferred in &self.model_priority {
            let base = preferred.split(':').next().unwrap_or(preferred);
            for model in &installed {
                if model.contains(preferred.as_str()) || model.starts_with(base) {
                    tracing::info!("Selected generation model: {}", model);
                    return Some(model.clone());
                }
            }
        }

        // Nothing from the priority list; settle for whatever is there
        if let Some(first) = installed.first() {
            tracing::info!("No preferred model installed, using: {}", first);
            return Some(first.clone());
        }

        tracing::warn!("No models installed on the generation backend");
        None
    }

    /// Generate an answer for `question` in `language`, conditioned on
    /// the retrieved `context` and the trailing conversation `history`.
    ///
    /// Always returns text: any backend failure, timeout or empty
    /// completion degrades to the fixed fallback message for `language`.
    pub async fn generate(
        &self,
        context: &str,
        question: &str,
        language: &str,
        history: &[ConversationTurn],
    ) -> String {
        let Some(model) = self.selected_model().await else {
            return fallback_message(language).to_string();
        };

        let system = system_instruction(language);

        let user_prompt = match build_user_prompt(context, question) {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::warn!("Prompt rendering failed, using raw question: {}", e);
                question.to_string()
            }
        };

        let messages = assemble_messages(system, history, &user_prompt, self.history_window);
        let request = ChatRequest::new(model, messages)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);

        match self.backend.chat(&request).await {
            Ok(answer) if !answer.trim().is_empty() => answer,
            Ok(_) => {
                tracing::warn!("Backend returned an empty completion");
                fallback_message(language).to_string()
            }
            Err(e) => {
                tracing::error!("Generation failed: {}", e);
                fallback_message(language).to_string()
            }
        }
    }
}
