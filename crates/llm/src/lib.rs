//! Generation backend crate for the Guichet pipeline.
//!
//! This crate provides a backend-agnostic abstraction for conversational
//! text generation. The pipeline only depends on the [`ChatBackend`]
//! trait; Ollama is the provided implementation.
//!
//! # Example
//! ```no_run
//! use guichet_llm::{ChatBackend, ChatMessage, ChatRequest, OllamaClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::new();
//! let request = ChatRequest::new("mistral:7b", vec![ChatMessage::user("Bonjour")]);
//! let answer = client.chat(&request).await?;
//! println!("{}", answer);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod providers;

// Re-export main types
pub use client::{ChatBackend, ChatMessage, ChatRequest, ChatRole};
pub use providers::OllamaClient;
