//! Typed errors for the concierge engine.

use thiserror::Error;

/// Errors surfaced by the concierge engine's public APIs.
///
/// The two variants separate non-retryable input problems from retryable
/// upstream outages so callers can decide whether a retry is worthwhile.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ConciergeError {
    /// A corpus record is malformed (e.g., missing its id).
    #[error("corrupt restaurant record: {reason}")]
    BadRecord {
        /// What was wrong with the record.
        reason: String,
    },

    /// The remote recommendation service could not be reached or answered
    /// with a non-success status or an undecodable payload.
    #[error("recommendation service unavailable: {message}")]
    Unavailable {
        /// Transport or decode failure detail.
        message: String,
    },
}

impl ConciergeError {
    /// True when retrying the same call might succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, ConciergeError::Unavailable { .. })
    }
}
