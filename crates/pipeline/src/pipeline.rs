//! Retrieve-and-generate orchestration.
//!
//! The pipeline entry point. Seven strictly sequential steps: detect
//! the question's language, resolve the user language, normalize into
//! the pivot language, retrieve and contextualize documents, generate
//! the pivot-language answer, translate it back, assemble the
//! structured result. Any error inside the sequence is absorbed at this
//! boundary into a degraded but valid [`AnswerResult`].

use crate::context::build_context;
use crate::generator::AnswerGenerator;
use crate::types::{AnswerResult, SourceRef};
use guichet_core::AppResult;
use guichet_lang::{LanguageDetector, TranslationService};
use guichet_prompt::ConversationTurn;
use guichet_retrieval::KeywordRetriever;
use std::sync::Arc;

/// Category used for sources when the document carries none.
const DEFAULT_CATEGORY: &str = "general";

/// Attribution used for sources when the document carries none.
const DEFAULT_SOURCE: &str = "admin";

/// The conversational question-answering pipeline.
///
/// Constructed once at the composition root and shared across
/// requests; each call runs its own request-scoped sequence.
pub struct RagPipeline {
    detector: LanguageDetector,
    translator: Arc<TranslationService>,
    retriever: KeywordRetriever,
    generator: AnswerGenerator,
    pivot_language: String,
    top_n: usize,
    context_budget: usize,
}

impl RagPipeline {
    pub fn new(
        detector: LanguageDetector,
        translator: Arc<TranslationService>,
        retriever: KeywordRetriever,
        generator: AnswerGenerator,
        pivot_language: impl Into<String>,
        top_n: usize,
        context_budget: usize,
    ) -> Self {
        Self {
            detector,
            translator,
            retriever,
            generator,
            pivot_language: pivot_language.into(),
            top_n,
            context_budget,
        }
    }

    /// Answer `question`, optionally forcing the answer language, given
    /// the bounded trailing `history` supplied by the conversation
    /// store. Never returns an error: failures degrade to an apology
    /// result with empty sources.
    pub async fn retrieve_and_generate(
        &self,
        question: &str,
        language: Option<&str>,
        history: &[ConversationTurn],
    ) -> AnswerResult {
        match self.run(question, language, history).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Pipeline failed, returning degraded result: {}", e);
                AnswerResult::degraded(language.unwrap_or_default())
            }
        }
    }

    async fn run(
        &self,
        question: &str,
        language: Option<&str>,
        history: &[ConversationTurn],
    ) -> AppResult<AnswerResult> {
        // Step 1: detect the input language. Set once, never overwritten.
        let original_language = self.detector.detect(question);

        // Step 2: the caller-supplied language wins when non-empty.
        let user_language = match language {
            Some(lang) if !lang.is_empty() => lang.to_string(),
            _ => original_language.clone(),
        };

        tracing::info!(
            detected = %original_language,
            used = %user_language,
            "Processing question"
        );

        // Step 3: normalize into the administrative pivot language.
        let pivot_question = self
            .translator
            .translate(question, &user_language, &self.pivot_language)
            .await;
        tracing::debug!("Pivot question: {}", pivot_question);

        // Step 4: keyword retrieval and context assembly.
        let retrieved = self.retriever.retrieve(&pivot_question, self.top_n).await?;
        let context = build_context(
            &retrieved,
            &self.translator,
            &self.pivot_language,
            self.context_budget,
        )
        .await;

        // Step 5: generate the answer in the pivot language.
        let pivot_answer = self
            .generator
            .generate(&context, &pivot_question, &self.pivot_language, history)
            .await;

        // Step 6: translate back to the user's language.
        let final_answer = self
            .translator
            .translate(&pivot_answer, &self.pivot_language, &user_language)
            .await;

        // Step 7: assemble the structured result.
        let sources = retrieved
            .iter()
            .map(|scored| SourceRef {
                title: scored.document.title.clone(),
                category: scored
                    .document
                    .category
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
                source: scored
                    .document
                    .source
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            })
            .collect();

        Ok(AnswerResult {
            answer: final_answer,
            sources,
            language: user_language,
            original_language: Some(original_language),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PIPELINE_APOLOGY;
    use guichet_core::{AppError, AppResult};
    use guichet_lang::{EngineProvider, LangPair, TranslationEngine};
    use guichet_llm::{ChatBackend, ChatRequest};
    use guichet_retrieval::{Document, DocumentStore, MemoryDocumentStore};
    use std::collections::HashMap;

    /// Phrase-table translation provider for deterministic tests.
    struct TableProvider {
        pairs: HashMap<LangPair, HashMap<String, String>>,
    }

    impl TableProvider {
        fn new(pairs: Vec<(&str, &str, Vec<(&str, &str)>)>) -> Self {
            let pairs = pairs
                .into_iter()
                .map(|(source, target, entries)| {
                    let table = entries
                        .into_iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect();
                    (LangPair::new(source, target), table)
                })
                .collect();
            Self { pairs }
        }
    }

    struct TableEngine {
        table: HashMap<String, String>,
    }

    #[async_trait::async_trait]
    impl TranslationEngine for TableEngine {
        async fn translate(&self, text: &str) -> AppResult<String> {
            self.table
                .get(text)
                .cloned()
                .ok_or_else(|| AppError::Translation(format!("no entry for '{}'", text)))
        }
    }

    #[async_trait::async_trait]
    impl EngineProvider for TableProvider {
        fn provider_name(&self) -> &str {
            "table"
        }

        fn supports(&self, pair: &LangPair) -> bool {
            self.pairs.contains_key(pair)
        }

        async fn load(&self, pair: &LangPair) -> AppResult<Arc<dyn TranslationEngine>> {
            Ok(Arc::new(TableEngine {
                table: self.pairs.get(pair).cloned().unwrap(),
            }))
        }
    }

    /// Backend with one installed model and a fixed French answer.
    struct FixedBackend {
        answer: String,
    }

    #[async_trait::async_trait]
    impl ChatBackend for FixedBackend {
        fn backend_name(&self) -> &str {
            "fixed"
        }

        async fn is_available(&self) -> bool {
            true
        }

        async fn list_models(&self) -> AppResult<Vec<String>> {
            Ok(vec!["mistral:7b".to_string()])
        }

        async fn chat(&self, _request: &ChatRequest) -> AppResult<String> {
            Ok(self.answer.clone())
        }
    }

    /// Store that always errors, to exercise failure containment.
    struct FailingStore;

    #[async_trait::async_trait]
    impl DocumentStore for FailingStore {
        async fn active_documents(&self) -> AppResult<Vec<Document>> {
            Err(AppError::Store("database unreachable".to_string()))
        }
    }

    const QUESTION_AR: &str = "كيف أحصل على جواز السفر؟";
    const QUESTION_FR: &str = "Comment obtenir le passeport ?";
    const ANSWER_FR: &str = "Voici la démarche pour le passeport.";
    const ANSWER_AR: &str = "إليك خطوات الحصول على جواز السفر.";

    fn passport_document() -> Document {
        Document {
            id: 1,
            title: "Obtenir un passeport".to_string(),
            content: "Pour obtenir le passeport marocain, remplir le formulaire de demande \
                      et fournir une copie de la carte d'identité nationale."
                .to_string(),
            language: "fr".to_string(),
            category: None,
            source: None,
            active: true,
        }
    }

    fn pipeline_with_store(store: Arc<dyn DocumentStore>) -> RagPipeline {
        let provider = TableProvider::new(vec![
            ("ar", "fr", vec![(QUESTION_AR, QUESTION_FR)]),
            ("fr", "ar", vec![(ANSWER_FR, ANSWER_AR)]),
        ]);
        let translator = Arc::new(TranslationService::new(Arc::new(provider), "en"));
        let backend = Arc::new(FixedBackend {
            answer: ANSWER_FR.to_string(),
        });
        let generator = AnswerGenerator::new(
            backend,
            vec!["mistral:7b".to_string()],
            0.7,
            1500,
            guichet_prompt::HISTORY_WINDOW,
        );

        RagPipeline::new(
            LanguageDetector::new("fr"),
            Arc::clone(&translator),
            KeywordRetriever::new(store),
            generator,
            "fr",
            3,
            500,
        )
    }

    #[tokio::test]
    async fn test_end_to_end_arabic_question_without_override() {
        let store = Arc::new(MemoryDocumentStore::new(vec![passport_document()]));
        let pipeline = pipeline_with_store(store);

        let result = pipeline.retrieve_and_generate(QUESTION_AR, None, &[]).await;

        assert_eq!(result.original_language.as_deref(), Some("ar"));
        assert_eq!(result.language, "ar");
        assert_eq!(result.answer, ANSWER_AR);
        assert_eq!(result.sources.len(), 1);
        assert_eq!(result.sources[0].title, "Obtenir un passeport");
        // Optional fields resolve to their defaults
        assert_eq!(result.sources[0].category, "general");
        assert_eq!(result.sources[0].source, "admin");
    }

    #[tokio::test]
    async fn test_caller_language_override_wins() {
        let store = Arc::new(MemoryDocumentStore::new(vec![passport_document()]));
        let pipeline = pipeline_with_store(store);

        let result = pipeline
            .retrieve_and_generate(QUESTION_AR, Some("fr"), &[])
            .await;

        // Detection still records Arabic, but the answer stays in the
        // caller's requested language (the pivot, so no back-translation).
        assert_eq!(result.original_language.as_deref(), Some("ar"));
        assert_eq!(result.language, "fr");
        assert_eq!(result.answer, ANSWER_FR);
    }

    #[tokio::test]
    async fn test_empty_override_falls_back_to_detection() {
        let store = Arc::new(MemoryDocumentStore::new(vec![passport_document()]));
        let pipeline = pipeline_with_store(store);

        let result = pipeline
            .retrieve_and_generate(QUESTION_AR, Some(""), &[])
            .await;
        assert_eq!(result.language, "ar");
    }

    #[tokio::test]
    async fn test_store_failure_is_contained() {
        let pipeline = pipeline_with_store(Arc::new(FailingStore));

        let result = pipeline.retrieve_and_generate(QUESTION_AR, None, &[]).await;

        assert_eq!(result.answer, PIPELINE_APOLOGY);
        assert!(result.sources.is_empty());
        assert!(result.original_language.is_none());
        // No caller language supplied: the degraded result echoes that
        assert_eq!(result.language, "");
    }

    #[tokio::test]
    async fn test_no_matching_documents_still_answers() {
        let store = Arc::new(MemoryDocumentStore::new(vec![Document {
            id: 1,
            title: "Bourses".to_string(),
            content: "inscription universitaire".to_string(),
            language: "fr".to_string(),
            category: Some("education".to_string()),
            source: None,
            active: true,
        }]));
        let pipeline = pipeline_with_store(store);

        let result = pipeline.retrieve_and_generate(QUESTION_AR, None, &[]).await;

        // Nothing retrieved: empty sources, but generation still ran
        assert!(result.sources.is_empty());
        assert_eq!(result.answer, ANSWER_AR);
    }
}
