//!
//! SDK configuration: credentials, endpoints, retry policy, map defaults,
//! and the mutable style catalog.
//!
//! A [`ConfigStore`] holds the single active [`Config`]. The configuration is
//! set once via [`ConfigStore::configure`] and is read-only afterwards, except
//! for style-catalog appends. Every accessor reports
//! [`ConfigError::NotConfigured`] until a configuration has been stored, so
//! callers can distinguish "not set up yet" from any other failure.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::Result;

pub mod errors;

pub use errors::ConfigError;


/// Retry and timeout policy for the network layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// Maximum number of request attempts (at least 1).
    pub max_retries: u32,
    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,
}

/// Backend endpoint layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    pub api_base_url: String,
    pub ships_endpoint: String,
    pub itineraries_endpoint: String,
}

/// The two opaque access credentials the SDK needs.
///
/// `engine_key` is handed to the rendering engine; `api_key` becomes the
/// bearer token on every backend request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfig {
    #[serde(alias = "mapBoxKey")]
    pub engine_key: String,
    #[serde(alias = "cruiseMapsKey")]
    pub api_key: String,
}

/// Styling for a single port marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortStyle {
    pub color: String,
    pub radius: f64,
}

/// Per-category port marker styling; absent categories fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortStyleConfig {
    pub start_port: Option<PortStyle>,
    pub end_port: Option<PortStyle>,
    pub intermediate_ports: Option<PortStyle>,
}

impl PortStyleConfig {
    /// Default marker style for the voyage start port.
    pub fn default_start() -> PortStyle {
        PortStyle {
            color: "#27ae60".to_string(),
            radius: 10.0,
        }
    }

    /// Default marker style for the voyage end port.
    pub fn default_end() -> PortStyle {
        PortStyle {
            color: "#e74c3c".to_string(),
            radius: 10.0,
        }
    }

    /// Default marker style for intermediate ports of call.
    pub fn default_intermediate() -> PortStyle {
        PortStyle {
            color: "#ff6b6b".to_string(),
            radius: 6.0,
        }
    }
}

/// Styling for the voyage track line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackStyle {
    pub color: String,
    pub width: f64,
}

impl Default for TrackStyle {
    fn default() -> Self {
        Self {
            color: "green".to_string(),
            width: 1.5,
        }
    }
}

/// Per-map rendering configuration.
///
/// Used both as the configured default and as a per-`load_map` override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    /// Style identifier handed to the rendering engine.
    pub map_style: String,
    pub zoom_level: f64,
    pub height: u32,
    pub width: u32,
    pub is_3d: bool,
    /// Static maps disable engine interactivity.
    pub is_static: bool,
    /// Whether directional arrows are drawn along the track.
    pub has_arrows: bool,
    /// Initial map center as `[longitude, latitude]`.
    pub center: [f64; 2],
    #[serde(default)]
    pub port_style: PortStyleConfig,
    #[serde(default)]
    pub track_style: Option<TrackStyle>,
}

/// The full SDK configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub auth: AuthConfig,
    pub map_defaults: MapConfig,
    /// Ordered set of selectable base styles; uniqueness enforced on insert.
    pub available_map_styles: Vec<String>,
    pub api: ApiConfig,
    pub network: NetworkConfig,
}

impl Config {
    /// Build the stock configuration around a pair of credentials.
    ///
    /// This is the explicit-initialization replacement for host-page
    /// auto-configuration: the caller supplies the two opaque keys and gets
    /// the default style catalog, endpoints, and retry policy.
    pub fn with_credentials(
        engine_key: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self> {
        let engine_key = engine_key.into();
        let api_key = api_key.into();
        if engine_key.is_empty() {
            return Err(ConfigError::MissingCredential {
                credential: "engine_key",
            }
            .into());
        }
        if api_key.is_empty() {
            return Err(ConfigError::MissingCredential {
                credential: "api_key",
            }
            .into());
        }

        let base_url = "http://localhost:8000/api/v1".to_string();
        Ok(Self {
            auth: AuthConfig {
                engine_key,
                api_key,
            },
            map_defaults: MapConfig {
                map_style: "styles/streets-v11".to_string(),
                zoom_level: 10.0,
                is_3d: false,
                is_static: false,
                has_arrows: true,
                height: 400,
                width: 600,
                center: [-74.5, 40.0],
                port_style: PortStyleConfig::default(),
                track_style: Some(TrackStyle::default()),
            },
            available_map_styles: vec![
                "styles/streets-v11".to_string(),
                "styles/light-v11".to_string(),
                "styles/dark-v11".to_string(),
                "styles/satellite-v9".to_string(),
                "styles/satellite-streets-v11".to_string(),
                "styles/navigation-day-v1".to_string(),
                "styles/navigation-night-v1".to_string(),
            ],
            api: ApiConfig {
                api_base_url: base_url.clone(),
                ships_endpoint: format!("{base_url}/ships"),
                itineraries_endpoint: format!("{base_url}/ships"),
            },
            network: NetworkConfig {
                max_retries: 3,
                timeout_ms: 30_000,
            },
        })
    }
}

/// Holds the single active configuration behind a read-write lock.
///
/// Cheap to clone; all clones share the same underlying configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    inner: Arc<RwLock<Option<Config>>>,
}

impl ConfigStore {
    /// Creates a new, unconfigured store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a configuration, overwriting any previous one.
    pub fn configure(&self, config: Config) {
        let mut guard = self.inner.write().unwrap();
        *guard = Some(config);
    }

    /// Check whether a configuration has been stored. Never fails.
    pub fn is_configured(&self) -> bool {
        self.inner.read().unwrap().is_some()
    }

    /// Get a clone of the full configuration (primarily for debugging).
    pub fn config(&self) -> Result<Config> {
        let guard = self.inner.read().unwrap();
        guard.clone().ok_or_else(|| ConfigError::NotConfigured.into())
    }

    /// Get the backend endpoint layout.
    pub fn endpoints(&self) -> Result<ApiConfig> {
        Ok(self.config()?.api)
    }

    /// Get the network retry/timeout policy.
    pub fn network(&self) -> Result<NetworkConfig> {
        Ok(self.config()?.network)
    }

    /// Get the rendering-engine credential.
    pub fn engine_key(&self) -> Result<String> {
        Ok(self.config()?.auth.engine_key)
    }

    /// Get the backend API credential used as the bearer token.
    pub fn api_key(&self) -> Result<String> {
        Ok(self.config()?.auth.api_key)
    }

    /// Get the default per-map rendering configuration.
    pub fn map_defaults(&self) -> Result<MapConfig> {
        Ok(self.config()?.map_defaults)
    }

    /// Get the ordered style catalog.
    pub fn available_map_styles(&self) -> Result<Vec<String>> {
        Ok(self.config()?.available_map_styles)
    }

    /// Append a style identifier to the catalog if it is not already present.
    ///
    /// Set semantics over an ordered sequence: duplicates are a silent no-op
    /// and existing order is preserved.
    pub fn add_style(&self, style: impl Into<String>) -> Result<()> {
        let style = style.into();
        let mut guard = self.inner.write().unwrap();
        let config = guard.as_mut().ok_or(ConfigError::NotConfigured)?;
        if !config.available_map_styles.contains(&style) {
            config.available_map_styles.push(style);
        }
        Ok(())
    }
}
