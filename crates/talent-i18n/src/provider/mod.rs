//! Translation backends and the best-effort provider chain.
//!
//! A [`TranslationProvider`] never fails. Every backend error is logged and
//! reported as [`TranslateOutcome::Degraded`], and callers that only want a
//! string get the original text back.

mod deepl;
mod google;

pub use deepl::DeepLBackend;
pub use google::GoogleTranslateBackend;

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use talent_models::LanguageCode;
use tracing::{debug, error, warn};

use crate::config::TranslationConfig;
use crate::error::{TranslationError, TranslationResult};
use crate::metrics;

/// An external machine translation service.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Stable name used in logs, metrics and responses.
    fn name(&self) -> &'static str;

    /// Whether this backend can translate `source` into `target`.
    fn supports(&self, source: LanguageCode, target: LanguageCode) -> bool;

    async fn translate(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> TranslationResult<String>;
}

/// Why a translation fell back to the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradeReason {
    /// No backend has credentials.
    NotConfigured,
    /// No configured backend handles the pair.
    UnsupportedPair,
    /// The last backend tried returned an error.
    Failed(String),
    /// The last backend tried did not answer in time.
    TimedOut,
    /// The last backend tried answered with blank text.
    EmptyResult,
}

impl fmt::Display for DegradeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegradeReason::NotConfigured => write!(f, "no translation backend configured"),
            DegradeReason::UnsupportedPair => write!(f, "no backend supports this language pair"),
            DegradeReason::Failed(message) => write!(f, "backend failed: {message}"),
            DegradeReason::TimedOut => write!(f, "backend timed out"),
            DegradeReason::EmptyResult => write!(f, "backend returned empty text"),
        }
    }
}

/// Result of a single translation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateOutcome {
    /// Empty text or `source == target`; nothing was sent anywhere.
    Identity,
    Translated {
        text: String,
        backend: &'static str,
    },
    Degraded {
        reason: DegradeReason,
    },
}

impl TranslateOutcome {
    /// Whether a backend was actually called.
    pub fn reached_backend(&self) -> bool {
        match self {
            TranslateOutcome::Translated { .. } => true,
            TranslateOutcome::Degraded { reason } => matches!(
                reason,
                DegradeReason::Failed(_) | DegradeReason::TimedOut | DegradeReason::EmptyResult
            ),
            TranslateOutcome::Identity => false,
        }
    }

    /// Translated text, or `original` for identity and degraded outcomes.
    pub fn into_text(self, original: &str) -> String {
        match self {
            TranslateOutcome::Translated { text, .. } => text,
            _ => original.to_string(),
        }
    }
}

/// Ordered chain of backends with a per-call timeout.
#[derive(Clone)]
pub struct TranslationProvider {
    backends: Vec<Arc<dyn TranslationBackend>>,
    timeout: Duration,
}

impl TranslationProvider {
    pub fn new(backends: Vec<Arc<dyn TranslationBackend>>, timeout: Duration) -> Self {
        Self { backends, timeout }
    }

    /// Provider with no backends; every call degrades to identity.
    pub fn unconfigured() -> Self {
        Self::new(Vec::new(), Duration::from_secs(10))
    }

    /// Build the chain from configured credentials: Google first, then DeepL.
    pub fn from_config(config: &TranslationConfig) -> TranslationResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(TranslationError::Network)?;

        let mut backends: Vec<Arc<dyn TranslationBackend>> = Vec::new();
        if let Some(key) = &config.google_api_key {
            backends.push(Arc::new(GoogleTranslateBackend::new(
                http.clone(),
                key.clone(),
                config.google_api_url.clone(),
            )));
        }
        if let Some(key) = &config.deepl_auth_key {
            backends.push(Arc::new(DeepLBackend::new(
                http.clone(),
                key.clone(),
                config.deepl_api_url.clone(),
            )));
        }

        if backends.is_empty() {
            warn!("No translation backend configured; translations will return original text");
        }

        Ok(Self::new(backends, config.timeout))
    }

    pub fn is_configured(&self) -> bool {
        !self.backends.is_empty()
    }

    pub fn backend_names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    /// Whether some backend would be called for this pair.
    pub fn can_translate(&self, source: LanguageCode, target: LanguageCode) -> bool {
        source != target && self.backends.iter().any(|b| b.supports(source, target))
    }

    /// Translate, reporting exactly what happened.
    ///
    /// Backends that support the pair are tried in order; the first
    /// non-blank answer wins.
    pub async fn try_translate(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> TranslateOutcome {
        if text.trim().is_empty() || source == target {
            return TranslateOutcome::Identity;
        }
        if self.backends.is_empty() {
            return TranslateOutcome::Degraded {
                reason: DegradeReason::NotConfigured,
            };
        }

        let mut last_reason = DegradeReason::UnsupportedPair;

        for backend in self.backends.iter().filter(|b| b.supports(source, target)) {
            let started = Instant::now();
            let result =
                tokio::time::timeout(self.timeout, backend.translate(text, source, target)).await;
            let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

            match result {
                Ok(Ok(translated)) if !translated.trim().is_empty() => {
                    metrics::record_translation(backend.name(), "translated", latency_ms);
                    debug!(
                        backend = backend.name(),
                        source = %source,
                        target = %target,
                        "Translated text"
                    );
                    return TranslateOutcome::Translated {
                        text: translated,
                        backend: backend.name(),
                    };
                }
                Ok(Ok(_)) => {
                    metrics::record_translation(backend.name(), "empty", latency_ms);
                    warn!(backend = backend.name(), source = %source, target = %target, "Backend returned empty translation");
                    last_reason = DegradeReason::EmptyResult;
                }
                Ok(Err(error)) => {
                    metrics::record_translation(backend.name(), "error", latency_ms);
                    log_backend_error(backend.name(), source, target, &error);
                    last_reason = DegradeReason::Failed(error.to_string());
                }
                Err(_) => {
                    metrics::record_translation(backend.name(), "timeout", latency_ms);
                    log_backend_error(
                        backend.name(),
                        source,
                        target,
                        &TranslationError::Timeout(self.timeout),
                    );
                    last_reason = DegradeReason::TimedOut;
                }
            }
        }

        TranslateOutcome::Degraded {
            reason: last_reason,
        }
    }

    /// Translate, falling back to the original text on any failure.
    pub async fn translate(&self, text: &str, source: LanguageCode, target: LanguageCode) -> String {
        self.try_translate(text, source, target)
            .await
            .into_text(text)
    }
}

/// Transient failures are expected under load; anything else usually means
/// a bad key or request and is logged louder.
fn log_backend_error(
    backend: &'static str,
    source: LanguageCode,
    target: LanguageCode,
    error: &TranslationError,
) {
    if error.is_transient() {
        warn!(backend, source = %source, target = %target, error = %error, "Translation failed");
    } else {
        error!(backend, source = %source, target = %target, error = %error, "Translation failed");
    }
}

impl fmt::Debug for TranslationProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationProvider")
            .field("backends", &self.backend_names())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Behavior {
        Echo,
        Fail,
        Reject,
        Blank,
        Hang,
    }

    struct FakeBackend {
        name: &'static str,
        only: Option<LanguageCode>,
        behavior: Behavior,
        calls: AtomicUsize,
    }

    impl FakeBackend {
        fn new(name: &'static str, behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                name,
                only: None,
                behavior,
                calls: AtomicUsize::new(0),
            })
        }

        fn only_for(name: &'static str, target: LanguageCode) -> Arc<Self> {
            Arc::new(Self {
                name,
                only: Some(target),
                behavior: Behavior::Echo,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TranslationBackend for FakeBackend {
        fn name(&self) -> &'static str {
            self.name
        }

        fn supports(&self, _source: LanguageCode, target: LanguageCode) -> bool {
            self.only.map_or(true, |only| only == target)
        }

        async fn translate(
            &self,
            text: &str,
            _source: LanguageCode,
            target: LanguageCode,
        ) -> TranslationResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::Echo => Ok(format!("[{target}] {text}")),
                Behavior::Fail => Err(TranslationError::from_http_status(503, "unavailable")),
                Behavior::Reject => Err(TranslationError::from_http_status(403, "invalid key")),
                Behavior::Blank => Ok("  ".to_string()),
                Behavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(text.to_string())
                }
            }
        }
    }

    fn chain(backends: Vec<Arc<FakeBackend>>) -> TranslationProvider {
        let backends = backends
            .into_iter()
            .map(|b| b as Arc<dyn TranslationBackend>)
            .collect();
        TranslationProvider::new(backends, Duration::from_millis(50))
    }

    #[tokio::test]
    async fn test_identity_makes_no_call() {
        let backend = FakeBackend::new("echo", Behavior::Echo);
        let provider = chain(vec![backend.clone()]);

        assert_eq!(
            provider.try_translate("hello", LanguageCode::Ta, LanguageCode::Ta).await,
            TranslateOutcome::Identity
        );
        assert_eq!(provider.translate("", LanguageCode::En, LanguageCode::Ta).await, "");
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_unconfigured_degrades_to_original() {
        let provider = TranslationProvider::unconfigured();
        let outcome = provider
            .try_translate("hello", LanguageCode::En, LanguageCode::Hi)
            .await;
        assert_eq!(
            outcome,
            TranslateOutcome::Degraded {
                reason: DegradeReason::NotConfigured
            }
        );
        assert!(!outcome.reached_backend());
        assert_eq!(
            provider.translate("hello", LanguageCode::En, LanguageCode::Hi).await,
            "hello"
        );
    }

    #[tokio::test]
    async fn test_falls_through_to_next_backend() {
        let failing = FakeBackend::new("primary", Behavior::Fail);
        let echo = FakeBackend::new("secondary", Behavior::Echo);
        let provider = chain(vec![failing.clone(), echo.clone()]);

        let outcome = provider
            .try_translate("hello", LanguageCode::En, LanguageCode::Ml)
            .await;
        assert_eq!(
            outcome,
            TranslateOutcome::Translated {
                text: "[ml] hello".to_string(),
                backend: "secondary"
            }
        );
        assert_eq!(failing.calls(), 1);
        assert_eq!(echo.calls(), 1);
    }

    #[tokio::test]
    async fn test_permanent_error_still_falls_through() {
        let rejecting = FakeBackend::new("primary", Behavior::Reject);
        let provider = chain(vec![rejecting.clone()]);

        let outcome = provider
            .try_translate("hello", LanguageCode::En, LanguageCode::Ta)
            .await;
        assert_eq!(
            outcome,
            TranslateOutcome::Degraded {
                reason: DegradeReason::Failed("Backend returned 403: invalid key".to_string())
            }
        );

        let echo = FakeBackend::new("secondary", Behavior::Echo);
        let provider = chain(vec![rejecting.clone(), echo.clone()]);
        let outcome = provider
            .try_translate("hello", LanguageCode::En, LanguageCode::Ta)
            .await;
        assert!(matches!(outcome, TranslateOutcome::Translated { backend: "secondary", .. }));
        assert_eq!(rejecting.calls(), 2);
    }

    #[tokio::test]
    async fn test_all_backends_fail() {
        let provider = chain(vec![
            FakeBackend::new("a", Behavior::Fail),
            FakeBackend::new("b", Behavior::Blank),
        ]);
        let outcome = provider
            .try_translate("hello", LanguageCode::En, LanguageCode::Bn)
            .await;
        assert_eq!(
            outcome,
            TranslateOutcome::Degraded {
                reason: DegradeReason::EmptyResult
            }
        );
        assert!(outcome.reached_backend());
        assert_eq!(
            provider.translate("hello", LanguageCode::En, LanguageCode::Bn).await,
            "hello"
        );
    }

    #[tokio::test]
    async fn test_timeout_degrades() {
        let provider = chain(vec![FakeBackend::new("slow", Behavior::Hang)]);
        let outcome = provider
            .try_translate("hello", LanguageCode::En, LanguageCode::Te)
            .await;
        assert_eq!(
            outcome,
            TranslateOutcome::Degraded {
                reason: DegradeReason::TimedOut
            }
        );
    }

    #[tokio::test]
    async fn test_unsupported_pair_skips_backend() {
        let hindi_only = FakeBackend::only_for("hindi", LanguageCode::Hi);
        let provider = chain(vec![hindi_only.clone()]);

        assert!(provider.can_translate(LanguageCode::En, LanguageCode::Hi));
        assert!(!provider.can_translate(LanguageCode::En, LanguageCode::Ta));

        let outcome = provider
            .try_translate("hello", LanguageCode::En, LanguageCode::Ta)
            .await;
        assert_eq!(
            outcome,
            TranslateOutcome::Degraded {
                reason: DegradeReason::UnsupportedPair
            }
        );
        assert_eq!(hindi_only.calls(), 0);
    }

    #[test]
    fn test_from_config_order() {
        let config = TranslationConfig {
            google_api_key: Some("g".into()),
            deepl_auth_key: Some("d".into()),
            ..Default::default()
        };
        let provider = tokio_test::assert_ok!(TranslationProvider::from_config(&config));
        assert_eq!(provider.backend_names(), vec!["google", "deepl"]);

        let provider = TranslationProvider::from_config(&TranslationConfig::default()).unwrap();
        assert!(!provider.is_configured());
    }
}
