//! Error types for the backend API module.

use thiserror::Error;

/// Errors from the ship and itinerary fetchers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// A configured endpoint could not be turned into a request URL.
    #[error("Invalid endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// The backend answered with a body that does not match the expected
    /// shape.
    #[error("Malformed API response: {reason}")]
    MalformedResponse { reason: String },
}
