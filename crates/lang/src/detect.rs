//! Best-effort language detection.
//!
//! Identifies the ISO-639-1 code of a text using a script heuristic
//! first (Arabic script is unambiguous for our language set), then
//! stop-word scoring to separate French from English. Undecidable input
//! falls back to one process-wide configured default rather than
//! guessing per call.

/// French function words used for stop-word scoring.
const FRENCH_STOPWORDS: &[&str] = &[
    "le", "la", "les", "de", "des", "du", "un", "une", "et", "est", "je", "pour", "comment", "que",
    "quoi", "vous", "mon", "ma", "mes", "avec", "sur", "dans", "ce", "cette", "qui", "ne", "pas",
    "obtenir", "faire", "demande",
];

/// English function words used for stop-word scoring.
const ENGLISH_STOPWORDS: &[&str] = &[
    "the", "a", "an", "of", "to", "and", "is", "are", "how", "what", "do", "i", "my", "for", "you",
    "in", "on", "with", "can", "get", "where", "when", "need",
];

/// Characters that only appear in French among our language set.
const FRENCH_MARKERS: &[char] = &[
    'é', 'è', 'ê', 'ë', 'à', 'â', 'ç', 'ô', 'î', 'ï', 'û', 'ù', 'œ',
];

/// Minimum share of Arabic-script characters for the text to be
/// classified as Arabic.
const ARABIC_SCRIPT_RATIO: f32 = 0.3;

/// Language detector with a configured fallback code.
#[derive(Debug, Clone)]
pub struct LanguageDetector {
    default_language: String,
}

impl LanguageDetector {
    /// Create a detector that falls back to `default_language` when the
    /// input is empty, too short or undecidable.
    pub fn new(default_language: impl Into<String>) -> Self {
        Self {
            default_language: default_language.into(),
        }
    }

    /// Detect the language of `text`. Never fails; returns the
    /// configured default instead.
    pub fn detect(&self, text: &str) -> String {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return self.default_language.clone();
        }

        if is_arabic_script(trimmed) {
            return "ar".to_string();
        }

        let lower = trimmed.to_lowercase();
        let mut french_score = lower.chars().filter(|c| FRENCH_MARKERS.contains(c)).count();
        let mut english_score = 0usize;

        for word in lower.split_whitespace() {
            let word = word.trim_matches(|c: char| !c.is_alphanumeric());
            if FRENCH_STOPWORDS.contains(&word) {
                french_score += 1;
            }
            if ENGLISH_STOPWORDS.contains(&word) {
                english_score += 1;
            }
        }

        tracing::trace!(
            french_score,
            english_score,
            "stop-word scores for detection"
        );

        match french_score.cmp(&english_score) {
            std::cmp::Ordering::Greater => "fr".to_string(),
            std::cmp::Ordering::Less => "en".to_string(),
            std::cmp::Ordering::Equal => self.default_language.clone(),
        }
    }
}

/// Check whether a significant share of the text is Arabic script.
fn is_arabic_script(text: &str) -> bool {
    let mut letters = 0usize;
    let mut arabic = 0usize;

    for c in text.chars() {
        if c.is_alphabetic() {
            letters += 1;
            if matches!(c, '\u{0600}'..='\u{06FF}' | '\u{0750}'..='\u{077F}' | '\u{08A0}'..='\u{08FF}')
            {
                arabic += 1;
            }
        }
    }

    letters > 0 && (arabic as f32 / letters as f32) >= ARABIC_SCRIPT_RATIO
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> LanguageDetector {
        LanguageDetector::new("fr")
    }

    #[test]
    fn test_detects_arabic_script() {
        assert_eq!(detector().detect("كيف أحصل على جواز السفر؟"), "ar");
    }

    #[test]
    fn test_detects_french() {
        assert_eq!(
            detector().detect("Comment obtenir une carte d'identité nationale ?"),
            "fr"
        );
    }

    #[test]
    fn test_detects_english() {
        assert_eq!(detector().detect("How do I get a passport?"), "en");
    }

    #[test]
    fn test_empty_text_falls_back_to_default() {
        assert_eq!(detector().detect("   "), "fr");
        assert_eq!(LanguageDetector::new("en").detect(""), "en");
    }

    #[test]
    fn test_undecidable_text_falls_back_to_default() {
        // No stop words, no markers, latin script
        assert_eq!(detector().detect("xyz 12345"), "fr");
    }
}
