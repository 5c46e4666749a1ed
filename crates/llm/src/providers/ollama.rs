//! Ollama chat backend implementation.
//!
//! This module provides integration with Ollama, a local LLM runtime.
//! Ollama API: https://github.com/ollama/ollama/blob/main/docs/api.md

use crate::client::{ChatBackend, ChatMessage, ChatRequest};
use guichet_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeout for the lightweight availability probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Default timeout for a chat completion.
const DEFAULT_CHAT_TIMEOUT: Duration = Duration::from_secs(120);

/// Ollama chat API request format.
#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Ollama chat API response format.
#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaChatMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaChatMessage {
    content: String,
}

/// Response format of GET /api/tags.
#[derive(Debug, Deserialize)]
struct OllamaTagsResponse {
    #[serde(default)]
    models: Vec<OllamaModelTag>,
}

#[derive(Debug, Deserialize)]
struct OllamaModelTag {
    name: String,
}

/// Ollama backend client.
pub struct OllamaClient {
    /// Base URL for the Ollama API
    base_url: String,

    /// HTTP client
    client: reqwest::Client,

    /// Timeout applied to chat completions
    chat_timeout: Duration,
}

impl OllamaClient {
    /// Create a new Ollama client with default settings.
    ///
    /// Default URL: http://localhost:11434
    pub fn new() -> Self {
        Self::with_base_url("http://localhost:11434")
    }

    /// Create a new Ollama client with a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
            chat_timeout: DEFAULT_CHAT_TIMEOUT,
        }
    }

    /// Set the timeout applied to chat completions.
    pub fn with_chat_timeout(mut self, timeout: Duration) -> Self {
        self.chat_timeout = timeout;
        self
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ChatBackend for OllamaClient {
    fn backend_name(&self) -> &str {
        "ollama"
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        match self.client.get(&url).timeout(PROBE_TIMEOUT).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!("Ollama availability probe failed: {}", e);
                false
            }
        }
    }

    async fn list_models(&self) -> AppResult<Vec<String>> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to query Ollama models: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Llm(format!(
                "Ollama API error ({}) while listing models",
                response.status()
            )));
        }

        let tags: OllamaTagsResponse = response
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to parse Ollama tags: {}", e)))?;

        let models: Vec<String> = tags.models.into_iter().map(|m| m.name).collect();
        tracing::debug!("Ollama reports {} installed models", models.len());

        Ok(models)
    }

    async fn chat(&self, request: &ChatRequest) -> AppResult<String> {
        tracing::info!("Sending chat request to Ollama (model: {})", request.model);
        tracing::debug!("Chat request: {} messages", request.messages.len());

        let ollama_request = OllamaChatRequest {
            model: &request.model,
            messages: &request.messages,
            stream: false,
            options: OllamaOptions {
                temperature: request.temperature,
                num_predict: request.max_tokens,
            },
        };

        let url = format!("{}/api/chat", self.base_url);

        let response = self
            .client
            .post(&url)
            .timeout(self.chat_timeout)
            .json(&ollama_request)
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to send chat request to Ollama: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Llm(format!(
                "Ollama API error ({}): {}",
                status, error_text
            )));
        }

        let chat_response: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to parse Ollama chat response: {}", e)))?;

        tracing::info!("Received chat completion from Ollama");

        Ok(chat_response.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_ollama_client_creation() {
        let client = OllamaClient::new();
        assert_eq!(client.backend_name(), "ollama");
        assert_eq!(client.base_url, "http://localhost:11434");
    }

    #[tokio::test]
    async fn test_list_models_parses_tags() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "models": [
                    {"name": "mistral:7b"},
                    {"name": "qwen2.5:7b"}
                ]
            })))
            .mount(&server)
            .await;

        let client = OllamaClient::with_base_url(server.uri());
        assert!(client.is_available().await);

        let models = client.list_models().await.unwrap();
        assert_eq!(models, vec!["mistral:7b", "qwen2.5:7b"]);
    }

    #[tokio::test]
    async fn test_chat_returns_message_content() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(serde_json::json!({
                "model": "mistral:7b",
                "stream": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": {"role": "assistant", "content": "Bonjour !"},
                "done": true
            })))
            .mount(&server)
            .await;

        let client = OllamaClient::with_base_url(server.uri());
        let request = ChatRequest::new("mistral:7b", vec![ChatMessage::user("Salut")])
            .with_temperature(0.7)
            .with_max_tokens(1500);

        let answer = client.chat(&request).await.unwrap();
        assert_eq!(answer, "Bonjour !");
    }

    #[tokio::test]
    async fn test_chat_maps_http_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model crashed"))
            .mount(&server)
            .await;

        let client = OllamaClient::with_base_url(server.uri());
        let request = ChatRequest::new("mistral:7b", vec![ChatMessage::user("Salut")]);

        let err = client.chat(&request).await.unwrap_err();
        assert!(err.to_string().contains("Ollama API error"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_not_available() {
        // Port 1 is never listening
        let client = OllamaClient::with_base_url("http://127.0.0.1:1");
        assert!(!client.is_available().await);
    }
}
