//! Cross-lingual normalization with cached per-pair engines.
//!
//! `TranslationService` resolves a translation in this order:
//! identity short-circuit, direct pair engine, two-step chain through
//! the hub language, and finally fail-open (the input text is returned
//! unchanged). Translation is best-effort by contract: it degrades, it
//! never errors.

use crate::engine::{EngineProvider, LangPair, TranslationEngine};
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;

type EngineCell = Arc<OnceCell<Arc<dyn TranslationEngine>>>;

/// Translation service with a process-wide engine cache.
///
/// The cache maps each language pair to a `OnceCell`, so the expensive
/// engine load runs at most once per pair per process; after
/// initialization, readers only take the map lock for the lookup.
/// Failed loads are not memoized, so a later request may retry the pair.
pub struct TranslationService {
    provider: Arc<dyn EngineProvider>,
    hub_language: String,
    engines: Mutex<HashMap<LangPair, EngineCell>>,
}

impl TranslationService {
    /// Create a service over an engine provider, chaining through
    /// `hub_language` when no direct pair resource exists.
    pub fn new(provider: Arc<dyn EngineProvider>, hub_language: impl Into<String>) -> Self {
        Self {
            provider,
            hub_language: hub_language.into(),
            engines: Mutex::new(HashMap::new()),
        }
    }

    /// Hub language indirect translations are routed through.
    pub fn hub_language(&self) -> &str {
        &self.hub_language
    }

    /// Translate `text` from `source` to `target`. Best-effort: when no
    /// direct or hub path resolves, the input is returned unchanged.
    pub async fn translate(&self, text: &str, source: &str, target: &str) -> String {
        self.translate_boxed(text.to_string(), source.to_string(), target.to_string())
            .await
    }

    /// Recursive resolution step. Boxed so the hub fallback can re-enter
    /// the same contract (and benefit from the same cache).
    fn translate_boxed(
        &self,
        text: String,
        source: String,
        target: String,
    ) -> BoxFuture<'_, String> {
        Box::pin(async move {
            // Identity short-circuit, before any engine lookup
            if source == target {
                return text;
            }

            let pair = LangPair::new(&source, &target);
            if let Some(engine) = self.engine_for(&pair).await {
                match engine.translate(&text).await {
                    Ok(translated) => return translated,
                    Err(e) => {
                        tracing::warn!("Translation {} failed: {}", pair, e);
                    }
                }
            }

            // Chain through the hub when neither side is the hub itself
            if source != self.hub_language && target != self.hub_language {
                tracing::debug!("No direct path for {}, chaining via {}", pair, self.hub_language);
                let step = self
                    .translate_boxed(text.clone(), source.clone(), self.hub_language.clone())
                    .await;
                return self
                    .translate_boxed(step, self.hub_language.clone(), target)
                    .await;
            }

            // Fail open: degraded output beats no output
            tracing::warn!("No translation path for {}, returning text unchanged", pair);
            text
        })
    }

    /// Get the cached engine for a pair, loading it on first use.
    async fn engine_for(&self, pair: &LangPair) -> Option<Arc<dyn TranslationEngine>> {
        if !self.provider.supports(pair) {
            return None;
        }

        let cell = {
            let mut engines = self.engines.lock().expect("engine cache poisoned");
            Arc::clone(engines.entry(pair.clone()).or_default())
        };

        match cell
            .get_or_try_init(|| async { self.provider.load(pair).await })
            .await
        {
            Ok(engine) => Some(Arc::clone(engine)),
            Err(e) => {
                tracing::warn!("Failed to load translation engine for {}: {}", pair, e);
                None
            }
        }
    }
}
