//! Multilingual text pipeline for the talent platform.
//!
//! This crate provides:
//! - Script, keyword and frequency classifiers for Indian languages
//! - A weighted-vote [`LanguageDetector`] with a bounded result cache
//! - A best-effort [`TranslationProvider`] over Google and DeepL
//! - A [`TranslationOrchestrator`] that fans text out to every language
//!
//! Nothing here fails because a translation service is down. Detection
//! degrades to English and translation degrades to the original text.

pub mod classifier;
pub mod config;
pub mod detector;
pub mod error;
pub mod metrics;
pub mod orchestrator;
pub mod provider;

pub use classifier::{Classifier, FrequencyClassifier, KeywordClassifier, ScriptClassifier};
pub use config::TranslationConfig;
pub use detector::{Detection, DetectionCache, LanguageDetector, StatisticalGuesser, WhatlangGuesser};
pub use error::{TranslationError, TranslationResult};
pub use orchestrator::{BatchTranslation, TranslationOrchestrator};
pub use provider::{
    DeepLBackend, DegradeReason, GoogleTranslateBackend, TranslateOutcome, TranslationBackend,
    TranslationProvider,
};
