//! Cross-cutting error types for Kiroku.
//!
//! Transport-level errors live in `kiroku-remote`; the sync pipeline wraps
//! them in its own retry and resolution errors.

use thiserror::Error;

/// Errors that can be raised by any Kiroku crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A catalog "Type" value that maps to no media kind.
    #[error("Unknown media kind: {0}")]
    UnknownMediaKind(String),
}
