//! Keyword retrieval and scoring.
//!
//! Scoring is deliberately simple and preserved for compatibility: the
//! query is split into lowercase whitespace-delimited terms, and a
//! document's score is the number of terms (duplicates counted) that
//! occur as substrings of its lowercased content. There is no stemming
//! and no token-boundary matching, so substring false positives are
//! possible ("carte" matches "cartes" but also "écarter"). Documents
//! that match no term are excluded entirely.

use crate::store::DocumentStore;
use crate::types::ScoredDocument;
use guichet_core::AppResult;
use std::sync::Arc;

/// Term-overlap retriever over a document store.
pub struct KeywordRetriever {
    store: Arc<dyn DocumentStore>,
}

impl KeywordRetriever {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Retrieve the `top_n` most relevant active documents for a query
    /// already normalized into the pivot language.
    pub async fn retrieve(&self, query: &str, top_n: usize) -> AppResult<Vec<ScoredDocument>> {
        let terms: Vec<String> = query
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();

        let documents = self.store.active_documents().await?;
        tracing::debug!(
            "Scoring {} active documents against {} query terms",
            documents.len(),
            terms.len()
        );

        let mut scored: Vec<ScoredDocument> = documents
            .into_iter()
            .filter_map(|document| {
                let content = document.content.to_lowercase();
                let score = terms.iter().filter(|term| content.contains(*term)).count();
                (score > 0).then_some(ScoredDocument { document, score })
            })
            .collect();

        // Stable sort: ties keep store order, so results are
        // deterministic for identical input order.
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(top_n);

        tracing::info!("Retrieved {} documents for query", scored.len());
        Ok(scored)
    }
}
