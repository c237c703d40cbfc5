//! Fan-out of one text into every supported language.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Serialize, Serializer};
use talent_models::{LanguageCode, TranslationMap};
use tracing::{debug, info};

use crate::config::TranslationConfig;
use crate::detector::{Detection, LanguageDetector};
use crate::error::TranslationResult;
use crate::provider::{TranslateOutcome, TranslationProvider};

/// Default delay between successive backend calls.
pub const DEFAULT_PACING: Duration = Duration::from_millis(100);

/// Source language label for blank batch entries.
pub const UNKNOWN_SOURCE: &str = "unknown";

/// One entry of a batch translation, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchTranslation {
    pub index: usize,
    pub original_text: String,
    /// `None` for blank input, serialized as `"unknown"`.
    #[serde(serialize_with = "serialize_source")]
    pub source_language: Option<LanguageCode>,
    pub translations: TranslationMap,
}

impl BatchTranslation {
    pub fn source_language_code(&self) -> &'static str {
        self.source_language
            .map(|lang| lang.as_str())
            .unwrap_or(UNKNOWN_SOURCE)
    }
}

fn serialize_source<S: Serializer>(
    source: &Option<LanguageCode>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match source {
        Some(lang) => lang.serialize(serializer),
        None => serializer.serialize_str(UNKNOWN_SOURCE),
    }
}

/// Spaces out backend calls within one request.
///
/// Only arms after a call that actually reached a backend, so identity and
/// unconfigured fan-outs never sleep.
struct Pacer {
    delay: Duration,
    armed: bool,
}

impl Pacer {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            armed: false,
        }
    }

    async fn wait(&self) {
        if self.armed && !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    fn record(&mut self, outcome: &TranslateOutcome) {
        if outcome.reached_backend() {
            self.armed = true;
        }
    }
}

/// Detects source languages and builds translation maps.
#[derive(Debug, Clone)]
pub struct TranslationOrchestrator {
    detector: Arc<LanguageDetector>,
    provider: Arc<TranslationProvider>,
    pacing: Duration,
}

impl TranslationOrchestrator {
    pub fn new(detector: Arc<LanguageDetector>, provider: Arc<TranslationProvider>) -> Self {
        Self {
            detector,
            provider,
            pacing: DEFAULT_PACING,
        }
    }

    /// Build the detector, provider chain and pacing from configuration.
    pub fn from_config(config: &TranslationConfig) -> TranslationResult<Self> {
        let detector = Arc::new(LanguageDetector::from_config(config));
        let provider = Arc::new(TranslationProvider::from_config(config)?);

        info!(
            backends = ?provider.backend_names(),
            pacing_ms = config.pacing.as_millis() as u64,
            "Translation orchestrator ready"
        );

        Ok(Self::new(detector, provider).with_pacing(config.pacing))
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn detector(&self) -> &LanguageDetector {
        &self.detector
    }

    pub fn provider(&self) -> &TranslationProvider {
        &self.provider
    }

    /// Detect the language of `text` with its confidence.
    pub fn detect(&self, text: &str) -> Detection {
        self.detector.detect_with_confidence(text)
    }

    /// Translate into every supported language.
    pub async fn translate_to_all(&self, text: &str, source: Option<LanguageCode>) -> TranslationMap {
        self.translate_to(text, &[], source).await
    }

    /// Translate into `targets` (every supported language when empty).
    ///
    /// The result always holds `{source: text}` for non-blank text. Targets
    /// whose translation degraded are left out.
    pub async fn translate_to(
        &self,
        text: &str,
        targets: &[LanguageCode],
        source: Option<LanguageCode>,
    ) -> TranslationMap {
        let mut pacer = Pacer::new(self.pacing);
        self.fan_out(text, targets, source, &mut pacer).await
    }

    /// Detect the source language, then translate into every language.
    pub async fn detect_and_translate(&self, text: &str) -> (LanguageCode, TranslationMap) {
        let source = self.detector.detect(text);
        let translations = self.translate_to_all(text, Some(source)).await;
        (source, translations)
    }

    /// Translate each text independently, preserving order and indices.
    ///
    /// Blank entries are kept with an unknown source and no translations.
    pub async fn batch_translate(
        &self,
        texts: &[String],
        targets: &[LanguageCode],
    ) -> Vec<BatchTranslation> {
        let mut pacer = Pacer::new(self.pacing);
        let mut results = Vec::with_capacity(texts.len());

        for (index, text) in texts.iter().enumerate() {
            if text.trim().is_empty() {
                results.push(BatchTranslation {
                    index,
                    original_text: text.clone(),
                    source_language: None,
                    translations: TranslationMap::new(),
                });
                continue;
            }

            let source = self.detector.detect(text);
            let translations = self.fan_out(text, targets, Some(source), &mut pacer).await;
            results.push(BatchTranslation {
                index,
                original_text: text.clone(),
                source_language: Some(source),
                translations,
            });
        }

        results
    }

    /// Text for a reader: preferred language, then English, then any.
    pub fn preferred_text(map: &TranslationMap, preferred: LanguageCode) -> Option<&str> {
        map.preferred(preferred)
    }

    /// Code to display name for every supported language.
    pub fn supported_languages() -> BTreeMap<&'static str, &'static str> {
        LanguageCode::supported()
    }

    async fn fan_out(
        &self,
        text: &str,
        targets: &[LanguageCode],
        source: Option<LanguageCode>,
        pacer: &mut Pacer,
    ) -> TranslationMap {
        if text.trim().is_empty() {
            return TranslationMap::new();
        }

        let source = source.unwrap_or_else(|| self.detector.detect(text));
        let mut map = TranslationMap::seeded(source, text);

        for target in resolve_targets(targets) {
            if target == source {
                continue;
            }
            if self.provider.can_translate(source, target) {
                pacer.wait().await;
            }

            let outcome = self.provider.try_translate(text, source, target).await;
            pacer.record(&outcome);

            match outcome {
                TranslateOutcome::Translated { text, .. } => {
                    map.insert(target, text);
                }
                TranslateOutcome::Degraded { reason } => {
                    debug!(source = %source, target = %target, %reason, "Skipping target");
                }
                TranslateOutcome::Identity => {}
            }
        }

        map
    }
}

/// Requested targets without duplicates, or every language when empty.
fn resolve_targets(targets: &[LanguageCode]) -> Vec<LanguageCode> {
    if targets.is_empty() {
        return LanguageCode::ALL.to_vec();
    }
    let mut resolved = Vec::with_capacity(targets.len());
    for target in targets {
        if !resolved.contains(target) {
            resolved.push(*target);
        }
    }
    resolved
}
