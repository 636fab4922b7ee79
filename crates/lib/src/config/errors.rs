//! Error types for the configuration module.

use thiserror::Error;

/// Errors that can occur while reading or mutating the SDK configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// An operation was attempted before `configure()` was called.
    #[error("SDK not configured. Call configure() first")]
    NotConfigured,

    /// A credential required for initialization was empty or missing.
    #[error("Missing credential: {credential}")]
    MissingCredential {
        /// Which credential was missing
        credential: &'static str,
    },
}

impl ConfigError {
    /// Check if this is the unconfigured-state error.
    pub fn is_not_configured(&self) -> bool {
        matches!(self, ConfigError::NotConfigured)
    }
}
