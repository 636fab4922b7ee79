//!
//! Cruisemaps: an SDK for fetching cruise-ship itinerary geometry and
//! rendering it as a styled interactive map.
//!
//! ## Core Concepts
//!
//! The SDK is built around a small number of components:
//!
//! * **Client (`client::Client`)**: The explicitly constructed entry point. Holds the
//!   configuration, the network layer, and the renderer; cheap to clone and pass around.
//! * **ConfigStore (`config::ConfigStore`)**: The single active configuration (credentials,
//!   endpoints, retry policy, map defaults, style catalog). All other components read from it.
//! * **NetworkClient (`network::NetworkClient`)**: HTTP requests with retry, exponential
//!   backoff, and typed failure classification.
//! * **Geometry (`geometry`)**: GeoJSON-shaped itinerary data and minimal bounding-region
//!   computation, tolerant of malformed coordinates.
//! * **RenderEngine (`render::RenderEngine`)**: A pluggable rendering-engine seam. The SDK
//!   specifies which calls are made into the engine and in what order; a [`render::Headless`]
//!   engine ships in-tree for testing and embedding.
//! * **MapRenderer (`render::MapRenderer`)**: The per-container map lifecycle — acquire
//!   surface, fetch geometry, wait for style readiness, fit bounds, compose layers, register.

pub mod api;
pub mod client;
pub mod config;
pub mod geometry;
pub mod network;
pub mod render;

// Re-export the main entry points for easier access.
pub use client::Client;
pub use config::{Config, ConfigStore};
pub use render::{LoadMapData, LoadMapParams, MapRenderer};

/// Result type used throughout the cruisemaps library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the cruisemaps library.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured configuration errors from the config module
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    /// Structured network errors from the network module
    #[error(transparent)]
    Network(#[from] network::NetworkError),

    /// Structured API errors from the api module
    #[error(transparent)]
    Api(#[from] api::ApiError),

    /// Structured rendering errors from the render module
    #[error(transparent)]
    Render(#[from] render::RenderError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::Network(_) => "network",
            Error::Api(_) => "api",
            Error::Render(_) => "render",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error means the SDK has not been configured yet.
    pub fn is_not_configured(&self) -> bool {
        matches!(self, Error::Config(config::ConfigError::NotConfigured))
    }

    /// Check if this error is a rate-limit rejection (never retried).
    pub fn is_rate_limited(&self) -> bool {
        match self {
            Error::Network(network_err) => network_err.is_rate_limited(),
            _ => false,
        }
    }

    /// Check if this error is an authentication failure (never retried).
    pub fn is_authentication_error(&self) -> bool {
        match self {
            Error::Network(network_err) => network_err.is_authentication_error(),
            _ => false,
        }
    }

    /// Check if this error was eligible for retry before the policy gave up.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Network(network_err) => network_err.is_retryable(),
            _ => false,
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Render(render_err) => render_err.is_not_found(),
            _ => false,
        }
    }
}
