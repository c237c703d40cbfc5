//! Language detection by weighted classifier vote.
//!
//! Detection never fails: when no signal is strong enough the result
//! degrades to English.

mod cache;
mod guesser;

pub use cache::DetectionCache;
pub use guesser::{resolve_guess, StatisticalGuesser, WhatlangGuesser};

use std::sync::{Arc, LazyLock};

use regex::Regex;
use talent_models::{ConfidenceTier, LanguageCode};
use tracing::{debug, warn};

use crate::classifier::{
    strongest, Classifier, FrequencyClassifier, KeywordClassifier, ScriptClassifier,
};
use crate::config::TranslationConfig;
use crate::metrics;

/// Default number of memoized detections.
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// Inputs shorter than this (after trimming) are English by definition.
const MIN_DETECTABLE_CHARS: usize = 3;

const SCRIPT_WEIGHT: u32 = 3;
const KEYWORD_WEIGHT: u32 = 2;
const FREQUENCY_WEIGHT: u32 = 1;

const SCRIPT_CONFIDENCE: f64 = 0.5;
const KEYWORD_CONFIDENCE: f64 = 0.3;
const FREQUENCY_CONFIDENCE: f64 = 0.2;

/// Plain ASCII letters, digits and basic punctuation.
static ASCII_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9\s.,!?\-()]+$").expect("ASCII text pattern is valid")
});

/// A detected language with the agreement score behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub language: LanguageCode,
    /// Classifier agreement in [0, 1]. Informational only.
    pub confidence: f64,
}

impl Detection {
    pub fn tier(&self) -> ConfidenceTier {
        ConfidenceTier::from_score(self.confidence)
    }
}

/// Combines the script, keyword and frequency classifiers with an optional
/// statistical fallback and a bounded result cache.
pub struct LanguageDetector {
    script: ScriptClassifier,
    keyword: KeywordClassifier,
    frequency: FrequencyClassifier,
    guesser: Option<Arc<dyn StatisticalGuesser>>,
    cache: Option<DetectionCache>,
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageDetector {
    /// Detector with the default cache and the `whatlang` fallback.
    pub fn new() -> Self {
        Self {
            script: ScriptClassifier::new(),
            keyword: KeywordClassifier::new(),
            frequency: FrequencyClassifier::new(),
            guesser: Some(Arc::new(WhatlangGuesser::new())),
            cache: DetectionCache::with_capacity(DEFAULT_CACHE_CAPACITY),
        }
    }

    pub fn from_config(config: &TranslationConfig) -> Self {
        let detector = Self::new().with_cache_capacity(config.detection_cache_capacity);
        if config.statistical_detection {
            detector
        } else {
            detector.without_guesser()
        }
    }

    /// Replace the cache; zero disables caching.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache = DetectionCache::with_capacity(capacity);
        self
    }

    pub fn with_guesser(mut self, guesser: Arc<dyn StatisticalGuesser>) -> Self {
        self.guesser = Some(guesser);
        self
    }

    pub fn without_guesser(mut self) -> Self {
        self.guesser = None;
        self
    }

    pub fn cache(&self) -> Option<&DetectionCache> {
        self.cache.as_ref()
    }

    /// Detect the language of `text`. Always returns a supported language.
    pub fn detect(&self, text: &str) -> LanguageCode {
        if text.trim().chars().count() < MIN_DETECTABLE_CHARS {
            metrics::record_detection(LanguageCode::En.as_str(), "short");
            return LanguageCode::En;
        }

        if let Some(cache) = &self.cache {
            if let Some(language) = cache.get(text) {
                metrics::record_cache_lookup(true);
                return language;
            }
            metrics::record_cache_lookup(false);
        }

        let (language, path) = self.resolve(text);
        metrics::record_detection(language.as_str(), path);

        if let Some(cache) = &self.cache {
            cache.insert(text, language);
        }
        language
    }

    /// Detect and score agreement in one call.
    pub fn detect_with_confidence(&self, text: &str) -> Detection {
        let language = self.detect(text);
        Detection {
            language,
            confidence: self.confidence(text, language),
        }
    }

    /// Agreement of each classifier with `language`, capped at 1.0.
    pub fn confidence(&self, text: &str, language: LanguageCode) -> f64 {
        if text.is_empty() {
            return 0.0;
        }

        let signals = [
            (self.script.classify(text), SCRIPT_CONFIDENCE),
            (self.keyword.classify(text), KEYWORD_CONFIDENCE),
            (self.frequency.classify(text), FREQUENCY_CONFIDENCE),
        ];

        let score: f64 = signals
            .iter()
            .filter(|(vote, _)| *vote == Some(language))
            .map(|(_, weight)| weight)
            .sum();
        score.min(1.0)
    }

    /// Weighted votes in first-seen order: script, keyword, frequency.
    pub fn tally(&self, text: &str) -> Vec<(LanguageCode, u32)> {
        let ballots: [(&dyn Classifier, u32); 3] = [
            (&self.script, SCRIPT_WEIGHT),
            (&self.keyword, KEYWORD_WEIGHT),
            (&self.frequency, FREQUENCY_WEIGHT),
        ];

        let mut tally: Vec<(LanguageCode, u32)> = Vec::with_capacity(ballots.len());
        for (classifier, weight) in ballots {
            let Some(language) = classifier.classify(text) else {
                continue;
            };
            debug!(classifier = classifier.name(), vote = %language, weight, "Classifier vote");
            match tally.iter_mut().find(|(seen, _)| *seen == language) {
                Some((_, total)) => *total += weight,
                None => tally.push((language, weight)),
            }
        }
        tally
    }

    fn resolve(&self, text: &str) -> (LanguageCode, &'static str) {
        let tally = self.tally(text);
        if let Some((language, _)) = strongest(tally.iter().copied()) {
            debug!(?tally, winner = %language, "Language detection votes");
            return (language, "vote");
        }

        if let Some(guess) = self.guesser.as_ref().and_then(|g| g.guess(text)) {
            let language = resolve_guess(&guess);
            debug!(guess = %guess, resolved = %language, "Statistical language guess");
            return (language, "statistical");
        }

        if ASCII_TEXT.is_match(text.trim()) {
            return (LanguageCode::En, "ascii");
        }

        let preview: String = text.chars().take(50).collect();
        warn!(preview = %preview, "Could not reliably detect language, defaulting to English");
        (LanguageCode::En, "fallback")
    }
}

impl std::fmt::Debug for LanguageDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageDetector")
            .field("statistical", &self.guesser.is_some())
            .field("cache", &self.cache)
            .finish()
    }
}
