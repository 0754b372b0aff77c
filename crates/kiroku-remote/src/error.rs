//! Remote adapter error types.

use std::time::Duration;

use kiroku_core::Transient;
use thiserror::Error;

/// Errors that can occur when talking to Jikan, Google search, or Notion.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Failed to parse a response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The service returned a 429 Too Many Requests response.
    #[error("rate limited{}", .retry_after_secs.map(|s| format!(", retry after {s}s")).unwrap_or_default())]
    RateLimited {
        /// Seconds the service asked us to wait, from `Retry-After`.
        retry_after_secs: Option<u64>,
    },
}

impl Transient for RemoteError {
    fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited { .. } => true,
            Self::Api { status, .. } => matches!(status, 408 | 500 | 502 | 503 | 504),
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Parse(_) => false,
        }
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after_secs } => retry_after_secs.map(Duration::from_secs),
            _ => None,
        }
    }
}
