//! Generation context assembly.

use guichet_lang::TranslationService;
use guichet_retrieval::ScoredDocument;

/// Separator placed before each document excerpt in the context.
const DOCUMENT_SEPARATOR: &str = "\n---\n";

/// Build the generation context from retrieved documents.
///
/// Each document whose language differs from the pivot is translated
/// into it first (best-effort), then truncated to the per-document
/// character budget.
pub async fn build_context(
    documents: &[ScoredDocument],
    translator: &TranslationService,
    pivot_language: &str,
    budget: usize,
) -> String {
    let mut context = String::new();

    for scored in documents {
        let document = &scored.document;
        let content = if document.language != pivot_language {
            translator
                .translate(&document.content, &document.language, pivot_language)
                .await
        } else {
            document.content.clone()
        };

        context.push_str(DOCUMENT_SEPARATOR);
        context.extend(content.chars().take(budget));
    }

    tracing::debug!("Built generation context of {} chars", context.chars().count());
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use guichet_core::AppResult;
    use guichet_lang::{EngineProvider, LangPair, TranslationEngine};
    use guichet_retrieval::Document;
    use std::sync::Arc;

    struct UppercaseEngine;

    #[async_trait::async_trait]
    impl TranslationEngine for UppercaseEngine {
        async fn translate(&self, text: &str) -> AppResult<String> {
            Ok(text.to_uppercase())
        }
    }

    struct UppercaseProvider;

    #[async_trait::async_trait]
    impl EngineProvider for UppercaseProvider {
        fn provider_name(&self) -> &str {
            "uppercase"
        }

        fn supports(&self, _pair: &LangPair) -> bool {
            true
        }

        async fn load(&self, _pair: &LangPair) -> AppResult<Arc<dyn TranslationEngine>> {
            Ok(Arc::new(UppercaseEngine))
        }
    }

    fn scored(id: i64, content: &str, language: &str) -> ScoredDocument {
        ScoredDocument {
            document: Document {
                id,
                title: format!("doc {}", id),
                content: content.to_string(),
                language: language.to_string(),
                category: None,
                source: None,
                active: true,
            },
            score: 1,
        }
    }

    fn translator() -> TranslationService {
        TranslationService::new(Arc::new(UppercaseProvider), "en")
    }

    #[tokio::test]
    async fn test_pivot_documents_pass_through() {
        let docs = vec![scored(1, "contenu français", "fr")];
        let context = build_context(&docs, &translator(), "fr", 500).await;
        assert_eq!(context, "\n---\ncontenu français");
    }

    #[tokio::test]
    async fn test_foreign_documents_are_translated() {
        let docs = vec![scored(1, "arabic content", "ar")];
        let context = build_context(&docs, &translator(), "fr", 500).await;
        assert_eq!(context, "\n---\nARABIC CONTENT");
    }

    #[tokio::test]
    async fn test_truncation_respects_char_boundaries() {
        // Multi-byte content must not be sliced mid-character
        let docs = vec![scored(1, "ééééé", "fr")];
        let context = build_context(&docs, &translator(), "fr", 3).await;
        assert_eq!(context, "\n---\nééé");
    }

    #[tokio::test]
    async fn test_each_document_gets_its_own_budget() {
        let long = "x".repeat(600);
        let docs = vec![scored(1, &long, "fr"), scored(2, &long, "fr")];
        let context = build_context(&docs, &translator(), "fr", 500).await;
        // Two separators plus 500 chars each
        assert_eq!(context.chars().count(), 2 * 5 + 2 * 500);
    }
}
