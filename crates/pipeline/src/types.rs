//! Pipeline output contract.

use serde::{Deserialize, Serialize};

/// Attribution for one retrieved document, with the store's optional
/// fields resolved to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    pub title: String,
    pub category: String,
    pub source: String,
}

/// Structured answer returned by the orchestrator. The sole output
/// contract of the pipeline; the conversation store persists it as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResult {
    /// Answer text, rendered in `language`
    pub answer: String,

    /// Attributions for the retrieved documents, in retrieval order
    pub sources: Vec<SourceRef>,

    /// Language the answer is rendered in: the caller-supplied language
    /// when provided, else the detected one
    pub language: String,

    /// Language the question was detected as. Set once from the
    /// detector; absent only in the degraded fail-safe result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_language: Option<String>,
}

/// Generic apology used for the degraded fail-safe result, in the
/// administrative pivot language.
pub const PIPELINE_APOLOGY: &str =
    "Une erreur s'est produite lors du traitement. Veuillez réessayer.";

impl AnswerResult {
    /// Degraded fail-safe result: apology, no sources, language echoing
    /// whatever the caller supplied (possibly empty).
    pub fn degraded(language: &str) -> Self {
        Self {
            answer: PIPELINE_APOLOGY.to_string(),
            sources: Vec::new(),
            language: language.to_string(),
            original_language: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degraded_result_shape() {
        let result = AnswerResult::degraded("");
        assert_eq!(result.answer, PIPELINE_APOLOGY);
        assert!(result.sources.is_empty());
        assert_eq!(result.language, "");
        assert!(result.original_language.is_none());
    }

    #[test]
    fn test_serialization_schema() {
        let result = AnswerResult {
            answer: "Voici la démarche.".to_string(),
            sources: vec![SourceRef {
                title: "Passeport".to_string(),
                category: "passport".to_string(),
                source: "admin".to_string(),
            }],
            language: "fr".to_string(),
            original_language: Some("ar".to_string()),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["sources"][0]["title"], "Passeport");
        assert_eq!(json["original_language"], "ar");

        // Degraded results omit the detected language entirely
        let degraded = serde_json::to_value(AnswerResult::degraded("fr")).unwrap();
        assert!(degraded.get("original_language").is_none());
    }
}
