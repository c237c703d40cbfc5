//! Retry policy for store requests: exponential backoff with full jitter,
//! honoring `Retry-After` on 429.

use std::time::{Duration, SystemTime};

use tracing::{info_span, warn, Instrument};

use crate::error::{StoreError, StoreResult};
use crate::metrics::record_retry;

/// Retry policy configuration.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts.
    pub max_retries: u32,
    /// Base delay for exponential backoff (in milliseconds).
    pub base_delay_ms: u64,
    /// Maximum delay cap (in milliseconds).
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 100,
            max_delay_ms: 5000,
        }
    }
}

impl RetryConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_retries: env_or("STORE_MAX_RETRIES", defaults.max_retries),
            base_delay_ms: env_or("STORE_RETRY_BASE_MS", defaults.base_delay_ms),
            max_delay_ms: env_or("STORE_RETRY_MAX_MS", defaults.max_delay_ms),
        }
    }

    /// No retries at all.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Run `op` until it succeeds, fails with a non-retryable error, or the
/// retry budget is spent.
///
/// Network errors, 429 and 5xx are retried. The last error is returned once
/// `max_retries` is exhausted.
pub async fn with_retry<T, F, Fut>(config: &RetryConfig, operation: &str, op: F) -> StoreResult<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = StoreResult<T>>,
{
    with_retry_if(config, operation, StoreError::is_retryable, op).await
}

/// Like [`with_retry`], but only errors accepted by `retryable` are retried.
///
/// Inserts use [`StoreError::is_safe_to_replay`] so a 5xx that arrives after
/// the row was committed is not posted twice.
pub async fn with_retry_if<T, F, Fut>(
    config: &RetryConfig,
    operation: &str,
    retryable: fn(&StoreError) -> bool,
    op: F,
) -> StoreResult<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = StoreResult<T>>,
{
    let mut attempt = 0;
    loop {
        let span = info_span!("store_attempt", operation = %operation, attempt = attempt + 1);
        let error = match op().instrument(span).await {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        if !retryable(&error) || attempt >= config.max_retries {
            return Err(error);
        }

        let delay = config.delay_for(attempt, error.retry_after_ms());
        warn!(
            operation = %operation,
            attempt = attempt + 1,
            delay_ms = delay.as_millis() as u64,
            error = %error,
            "Store request failed, retrying"
        );
        record_retry(operation);
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

impl RetryConfig {
    /// Wait before retry number `attempt + 1`.
    ///
    /// A server-provided Retry-After wins but is capped at `max_delay_ms`.
    /// Otherwise full jitter over `base * 2^attempt`, never below `base`.
    pub fn delay_for(&self, attempt: u32, retry_after_ms: Option<u64>) -> Duration {
        if let Some(after) = retry_after_ms {
            return Duration::from_millis(after.min(self.max_delay_ms));
        }

        let ceiling = self
            .base_delay_ms
            .saturating_mul(2u64.saturating_pow(attempt))
            .min(self.max_delay_ms);
        let jittered = (ceiling as f64 * jitter_fraction()) as u64;

        Duration::from_millis(jittered.max(self.base_delay_ms))
    }
}

/// Pseudo-random fraction in [0, 1) from the clock's sub-second nanos.
fn jitter_fraction() -> f64 {
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    f64::from(nanos % 1000) / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast() -> RetryConfig {
        RetryConfig {
            max_retries: 2,
            base_delay_ms: 1,
            max_delay_ms: 5,
        }
    }

    #[test]
    fn test_retry_after_wins_but_is_capped() {
        let config = RetryConfig::default();
        assert_eq!(config.delay_for(0, Some(2000)), Duration::from_millis(2000));
        assert_eq!(config.delay_for(0, Some(60_000)), Duration::from_millis(5000));
    }

    #[test]
    fn test_backoff_stays_within_bounds() {
        let config = RetryConfig {
            max_retries: 3,
            base_delay_ms: 1000,
            max_delay_ms: 2000,
        };
        let delay = config.delay_for(10, None);
        assert!(delay.as_millis() <= 2000);
        assert!(delay.as_millis() >= 1000);
    }

    #[tokio::test]
    async fn test_retries_server_errors_then_succeeds() {
        let attempts = AtomicU32::new(0);
        let result = with_retry(&fast(), "select", || async {
            if attempts.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(StoreError::from_http_status(503, "unavailable"))
            } else {
                Ok(42)
            }
        })
        .await;

        assert_eq!(tokio_test::assert_ok!(result), 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_does_not_retry_client_errors() {
        let attempts = AtomicU32::new(0);
        let result: StoreResult<()> = with_retry(&fast(), "insert", || async {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::from_http_status(409, "duplicate"))
        })
        .await;

        assert!(matches!(result, Err(StoreError::Conflict(_))));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_replay_guard_stops_on_server_errors() {
        let attempts = AtomicU32::new(0);
        let result: StoreResult<()> =
            with_retry_if(&fast(), "insert", StoreError::is_safe_to_replay, || async {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(StoreError::from_http_status(502, "bad gateway"))
            })
            .await;

        assert!(matches!(result, Err(StoreError::ServerError(502, _))));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let attempts = AtomicU32::new(0);
        let result: StoreResult<()> = with_retry(&fast(), "update", || async {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::from_http_status(500, "boom"))
        })
        .await;

        assert!(matches!(result, Err(StoreError::ServerError(500, _))));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }
}
