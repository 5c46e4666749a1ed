//! Backend implementations.

mod ollama;

pub use ollama::OllamaClient;
