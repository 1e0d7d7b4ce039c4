//! The system-wide error taxonomy (§7).
//!
//! All fallible operations across the workspace return `TrinityResult<T>`.
//! The variants below are the abstract error kinds this system names; they
//! are intentionally flat rather than split per-crate since error handling
//! is a single cross-cutting contract owned by the core, not a concern
//! private to any one subsystem.

mod retry;

pub use retry::{retry_with_backoff, RetryPolicy};

use thiserror::Error;

/// Convenience alias used throughout the workspace.
pub type TrinityResult<T> = Result<T, TrinityError>;

#[derive(Debug, Error)]
pub enum TrinityError {
    /// Sensor access refused by the host platform; the pipeline refuses to start.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Attempt to process before initialization (missing config, uninitialized manager).
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// Malformed tier file or embedding dimension mismatch on load.
    /// Callers are expected to start the affected tier empty and log a warning.
    #[error("index corrupt: {0}")]
    IndexCorrupt(String),

    /// The embedding provider failed to produce a vector for an observation.
    /// The current pipeline iteration aborts; the next iteration proceeds.
    #[error("embedding failed: {0}")]
    EmbeddingFailed(String),

    /// A persistence read or write failed.
    #[error("persistence failed: {0}")]
    PersistenceFailed(String),

    /// Recoverable error, eligible for retry with linear backoff.
    #[error("transient error: {0}")]
    Transient(String),

    /// Invalid input that does not fit any of the above (e.g. dimension
    /// mismatch on a caller-supplied query vector, bad config value).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl TrinityError {
    /// Whether this error is eligible for the retry policy in §7
    /// ("Transient ... retried up to 3 times with linear backoff only for
    /// embedding and persistence").
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TrinityError::Transient(_)
                | TrinityError::EmbeddingFailed(_)
                | TrinityError::PersistenceFailed(_)
        )
    }
}

impl From<std::io::Error> for TrinityError {
    fn from(e: std::io::Error) -> Self {
        TrinityError::PersistenceFailed(e.to_string())
    }
}

impl From<serde_json::Error> for TrinityError {
    fn from(e: serde_json::Error) -> Self {
        TrinityError::PersistenceFailed(e.to_string())
    }
}
