//! Multilingual pipeline configuration.

use std::time::Duration;

/// Default Cloud Translation endpoint.
pub const DEFAULT_GOOGLE_API_URL: &str = "https://translation.googleapis.com";

/// Default DeepL endpoint (free tier).
pub const DEFAULT_DEEPL_API_URL: &str = "https://api-free.deepl.com/v2/translate";

/// Configuration for detection and translation.
#[derive(Debug, Clone)]
pub struct TranslationConfig {
    /// Google Cloud Translation API key
    pub google_api_key: Option<String>,
    /// Google Cloud Translation base URL
    pub google_api_url: String,
    /// DeepL auth key
    pub deepl_auth_key: Option<String>,
    /// DeepL translate endpoint
    pub deepl_api_url: String,
    /// Per-call timeout for a single backend request
    pub timeout: Duration,
    /// Delay between successive backend calls within one fan-out
    pub pacing: Duration,
    /// Detection cache capacity (0 disables the cache)
    pub detection_cache_capacity: usize,
    /// Use the statistical guesser when no classifier votes
    pub statistical_detection: bool,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            google_api_key: None,
            google_api_url: DEFAULT_GOOGLE_API_URL.to_string(),
            deepl_auth_key: None,
            deepl_api_url: DEFAULT_DEEPL_API_URL.to_string(),
            timeout: Duration::from_secs(10),
            pacing: Duration::from_millis(100),
            detection_cache_capacity: 1000,
            statistical_detection: true,
        }
    }
}

impl TranslationConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            google_api_key: non_empty_var("GOOGLE_TRANSLATE_API_KEY"),
            google_api_url: non_empty_var("GOOGLE_TRANSLATE_API_URL")
                .unwrap_or(defaults.google_api_url),
            deepl_auth_key: non_empty_var("DEEPL_AUTH_KEY"),
            deepl_api_url: non_empty_var("DEEPL_API_URL").unwrap_or(defaults.deepl_api_url),
            timeout: std::env::var("TRANSLATION_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            pacing: std::env::var("TRANSLATION_PACING_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.pacing),
            detection_cache_capacity: std::env::var("DETECTION_CACHE_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.detection_cache_capacity),
            statistical_detection: std::env::var("STATISTICAL_DETECTION")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(defaults.statistical_detection),
        }
    }

    /// Whether at least one translation backend has credentials.
    pub fn has_backend(&self) -> bool {
        self.google_api_key.is_some() || self.deepl_auth_key.is_some()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 8] = [
        "GOOGLE_TRANSLATE_API_KEY",
        "GOOGLE_TRANSLATE_API_URL",
        "DEEPL_AUTH_KEY",
        "DEEPL_API_URL",
        "TRANSLATION_TIMEOUT_SECS",
        "TRANSLATION_PACING_MS",
        "DETECTION_CACHE_CAPACITY",
        "STATISTICAL_DETECTION",
    ];

    fn clear() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear();
        let config = TranslationConfig::from_env();
        assert!(!config.has_backend());
        assert_eq!(config.pacing, Duration::from_millis(100));
        assert_eq!(config.detection_cache_capacity, 1000);
        assert!(config.statistical_detection);
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear();
        std::env::set_var("DEEPL_AUTH_KEY", "abc:fx");
        std::env::set_var("GOOGLE_TRANSLATE_API_KEY", "  ");
        std::env::set_var("TRANSLATION_PACING_MS", "0");
        std::env::set_var("STATISTICAL_DETECTION", "false");

        let config = TranslationConfig::from_env();
        assert_eq!(config.deepl_auth_key.as_deref(), Some("abc:fx"));
        assert!(config.google_api_key.is_none());
        assert_eq!(config.pacing, Duration::ZERO);
        assert!(!config.statistical_detection);
        clear();
    }
}
