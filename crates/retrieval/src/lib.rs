//! Retrieval crate for the Guichet pipeline.
//!
//! Provides the read-only document store adapter (SQLite and in-memory)
//! and the keyword retriever/scorer.

pub mod retriever;
pub mod store;
pub mod types;

pub use retriever::KeywordRetriever;
pub use store::{DocumentStore, MemoryDocumentStore, SqliteDocumentStore};
pub use types::{Document, ScoredDocument};
