//! Document types.

use serde::{Deserialize, Serialize};

/// A snapshot of an administrative document, as owned by the external
/// document store. Read-only to the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// ISO-639-1 code of the content
    pub language: String,
    /// Optional tag, e.g. "identity" or "passport"
    pub category: Option<String>,
    /// Optional attribution
    pub source: Option<String>,
    pub active: bool,
}

/// A document paired with its retrieval score. Transient: produced
/// during retrieval, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDocument {
    pub document: Document,
    /// Count of query terms found as substrings of the content
    pub score: usize,
}
