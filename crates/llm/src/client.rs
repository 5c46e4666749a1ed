//! Chat backend abstraction and request/response types.
//!
//! This module defines the core abstractions for talking to a
//! conversational text-generation backend (Ollama by default).

use guichet_core::AppResult;
use serde::{Deserialize, Serialize};

/// Role of a chat message.
///
/// A closed enumeration so that invalid role strings can never reach
/// the backend wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// System instruction
    System,
    /// End-user turn
    User,
    /// Model turn
    Assistant,
}

/// A single role-tagged message in a chat exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Chat completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier (e.g., "mistral:7b")
    pub model: String,

    /// Ordered message sequence: system first, then history, then the
    /// current user prompt
    pub messages: Vec<ChatMessage>,

    /// Temperature for sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    /// Create a new chat request with required fields.
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set the temperature for sampling.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Trait for conversational generation backends.
///
/// This abstracts the concrete backend (Ollama here) behind the three
/// capabilities the pipeline needs: an availability probe, model
/// listing, and a chat-style completion.
#[async_trait::async_trait]
pub trait ChatBackend: Send + Sync {
    /// Get the backend name (e.g., "ollama").
    fn backend_name(&self) -> &str;

    /// Check whether the backend is reachable.
    async fn is_available(&self) -> bool;

    /// List the identifiers of installed models.
    async fn list_models(&self) -> AppResult<Vec<String>>;

    /// Perform a chat completion and return the generated text.
    async fn chat(&self, request: &ChatRequest) -> AppResult<String>;
}
