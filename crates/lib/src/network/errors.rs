//! Error types for the network module.

use thiserror::Error;

/// Typed classification of a failed HTTP request.
///
/// Rate-limit and authentication failures are terminal: they propagate after
/// a single attempt. Everything else is eligible for retry up to the
/// configured policy limit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NetworkError {
    /// The backend answered 429; the request is not retried.
    #[error("Rate limit exceeded for {url}")]
    RateLimitExceeded { url: String },

    /// The backend answered 401 or 403; the request is not retried.
    #[error("Authentication failed with status {status} for {url}")]
    AuthenticationFailed { status: u16, url: String },

    /// Any other non-success HTTP status.
    #[error("HTTP {status} for {url}")]
    Http { status: u16, url: String },

    /// Transport-level failure (connection refused, DNS, timeout, ...).
    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
}

impl NetworkError {
    /// Check if this is a rate-limit rejection.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, NetworkError::RateLimitExceeded { .. })
    }

    /// Check if this is an authentication failure.
    pub fn is_authentication_error(&self) -> bool {
        matches!(self, NetworkError::AuthenticationFailed { .. })
    }

    /// Check if this failure was eligible for retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            NetworkError::Http { .. } | NetworkError::Transport { .. }
        )
    }

    /// The HTTP status associated with this failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkError::RateLimitExceeded { .. } => Some(429),
            NetworkError::AuthenticationFailed { status, .. } => Some(*status),
            NetworkError::Http { status, .. } => Some(*status),
            NetworkError::Transport { .. } => None,
        }
    }
}
