//! Exponential-backoff retry for unreliable network calls.
//!
//! Jikan, Google search, and Notion all throttle aggressively (429, and 503
//! from Jikan when MyAnimeList is slow). Every call site goes through one
//! [`Backoff`]; failures that classify as [`Transient`] are retried after
//! `base_delay * 2^attempt`, anything else is handed back immediately. When
//! the error carries a server wait hint (`Retry-After`), the delay is never
//! shorter than that hint.
//!
//! Attempts are numbered from 0. With `max_retries = N` an operation may run
//! `N + 1` times: up to `N` failures followed by a success still succeed,
//! a further failure ends in [`BackoffError::Exhausted`].

use std::fmt;
use std::future::Future;
use std::time::Duration;

use kiroku_config::SyncConfig;
use kiroku_core::Transient;
use thiserror::Error;

/// Configuration for retry behavior on transient errors.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries allowed after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubled for each later one.
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 16,
            base_delay: Duration::from_millis(1),
        }
    }
}

impl RetryConfig {
    #[must_use]
    pub fn from_sync_config(config: &SyncConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(config.base_delay_ms),
        }
    }

    /// Delay to wait after the failed attempt `attempt` (0-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    /// [`delay_for`](Self::delay_for), raised to the server's wait hint.
    #[must_use]
    pub fn delay_with_hint(&self, attempt: u32, hint: Option<Duration>) -> Duration {
        self.delay_for(attempt).max(hint.unwrap_or_default())
    }
}

/// Terminal outcome of a retried operation.
#[derive(Debug, Error)]
pub enum BackoffError<E> {
    /// Every allowed attempt failed with a transient error.
    #[error("gave up after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: E },

    /// The operation failed with an error that is not worth retrying.
    #[error("{0}")]
    Permanent(E),
}

/// Retry executor shared by every call site of a sync run.
#[derive(Debug, Clone, Default)]
pub struct Backoff {
    config: RetryConfig,
}

impl Backoff {
    #[must_use]
    pub const fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Run `operation` until it succeeds, fails permanently, or runs out of
    /// retries. `label` names the call site in log lines.
    ///
    /// # Errors
    ///
    /// Returns [`BackoffError::Permanent`] for the first non-transient error
    /// and [`BackoffError::Exhausted`] when the retry ceiling is exceeded.
    pub async fn execute<T, E, F, Fut>(
        &self,
        label: &str,
        mut operation: F,
    ) -> Result<T, BackoffError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Transient + fmt::Display,
    {
        let mut attempt: u32 = 0;
        loop {
            let error = match operation().await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            if !error.is_transient() {
                tracing::debug!(label, attempt, %error, "permanent failure, not retrying");
                return Err(BackoffError::Permanent(error));
            }

            if attempt >= self.config.max_retries {
                tracing::error!(label, attempts = attempt + 1, %error, "retries exhausted");
                return Err(BackoffError::Exhausted {
                    attempts: attempt + 1,
                    last: error,
                });
            }

            let delay = self.config.delay_with_hint(attempt, error.retry_after());
            tracing::warn!(
                label,
                attempt,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                %error,
                "transient failure, retrying"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}
