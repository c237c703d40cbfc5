//! Translation backend error types.

use std::time::Duration;

use thiserror::Error;

pub type TranslationResult<T> = Result<T, TranslationError>;

/// Failure of a single backend call.
///
/// These never escape [`crate::TranslationProvider`]; they are logged and
/// folded into a degraded outcome.
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("Unsupported language pair: {from} -> {to}")]
    UnsupportedPair { from: String, to: String },

    #[error("Backend returned {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl TranslationError {
    /// Classify a non-success HTTP response.
    pub fn from_http_status(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    /// Quota, server-side and connectivity failures. Anything else points
    /// at a request or credential problem that will not clear by itself.
    pub fn is_transient(&self) -> bool {
        match self {
            TranslationError::Http { status, .. } => *status == 429 || *status >= 500,
            TranslationError::Timeout(_) | TranslationError::Network(_) => true,
            _ => false,
        }
    }
}
