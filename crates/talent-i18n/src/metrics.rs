//! Multilingual pipeline metrics.
//!
//! Provides standardized metrics for:
//! - Detection results by language and decision path
//! - Detection cache hits and misses
//! - Translation outcomes and latency by backend

use metrics::{counter, histogram};

/// Metric name constants for consistency.
pub mod names {
    /// Total detections by language and path.
    pub const DETECTIONS_TOTAL: &str = "language_detections_total";

    /// Detection cache lookups by result (hit/miss).
    pub const DETECTION_CACHE_TOTAL: &str = "language_detection_cache_total";

    /// Translation calls by backend and outcome.
    pub const TRANSLATIONS_TOTAL: &str = "translations_total";

    /// Backend translation latency in seconds.
    pub const TRANSLATION_LATENCY_SECONDS: &str = "translation_latency_seconds";
}

/// Record a completed detection.
pub fn record_detection(language: &str, path: &'static str) {
    counter!(
        names::DETECTIONS_TOTAL,
        "language" => language.to_string(),
        "path" => path
    )
    .increment(1);
}

/// Record a detection cache lookup.
pub fn record_cache_lookup(hit: bool) {
    counter!(
        names::DETECTION_CACHE_TOTAL,
        "result" => if hit { "hit" } else { "miss" }
    )
    .increment(1);
}

/// Record a single backend call.
pub fn record_translation(backend: &str, outcome: &'static str, latency_ms: f64) {
    counter!(
        names::TRANSLATIONS_TOTAL,
        "backend" => backend.to_string(),
        "outcome" => outcome
    )
    .increment(1);

    histogram!(
        names::TRANSLATION_LATENCY_SECONDS,
        "backend" => backend.to_string()
    )
    .record(latency_ms / 1000.0);
}
