//!
//! The SDK entry point.
//!
//! [`Client`] is an explicitly constructed handle — there is no process-wide
//! singleton. Construct one per configuration over any [`RenderEngine`]
//! implementation; clones are cheap and share the same state, so the client
//! can be passed by reference or clone to every consumer.

use std::sync::Arc;

use handle_trait::Handle;

use crate::{
    Result,
    api::{self, FetchShipsOptions, FetchShipsResponse},
    config::{Config, ConfigStore},
    network::NetworkClient,
    render::{LoadMapParams, MapRenderer, RenderEngine},
};

/// Internal state for Client.
///
/// Client itself is just a cheap-to-clone handle wrapping `Arc<ClientInternal>`.
struct ClientInternal {
    config: ConfigStore,
    renderer: MapRenderer,
}

/// Itinerary-map SDK client.
///
/// ## Example
///
/// ```
/// # use std::sync::Arc;
/// # use cruisemaps::{Client, config::Config, render::Headless};
/// # fn main() -> cruisemaps::Result<()> {
/// let engine = Arc::new(Headless::new());
/// let client = Client::new(engine);
/// client.configure(Config::with_credentials("engine-key", "api-key")?);
/// assert!(client.is_configured());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Handle)]
pub struct Client {
    inner: Arc<ClientInternal>,
}

impl Client {
    /// Create an unconfigured client over the given rendering engine.
    ///
    /// Every operation except [`Client::is_configured`] and the ship
    /// listing requires [`Client::configure`] to have been called first.
    pub fn new(engine: Arc<dyn RenderEngine>) -> Self {
        let config = ConfigStore::new();
        let network = NetworkClient::new(config.clone());
        let renderer = MapRenderer::new(config.clone(), network, engine);
        Self {
            inner: Arc::new(ClientInternal { config, renderer }),
        }
    }

    /// Create a client pre-configured with the stock defaults around two
    /// credentials.
    ///
    /// This is the explicit initialization channel replacing host-page
    /// auto-configuration: instead of scraping attributes and broadcasting
    /// ready/error notifications, the caller passes the two opaque keys and
    /// receives the outcome directly.
    pub fn with_credentials(
        engine: Arc<dyn RenderEngine>,
        engine_key: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self> {
        let client = Self::new(engine);
        client.configure(Config::with_credentials(engine_key, api_key)?);
        Ok(client)
    }

    /// Store the SDK configuration, overwriting any previous one.
    pub fn configure(&self, config: Config) {
        self.inner.config.configure(config);
    }

    /// Check if the SDK is configured. Never fails.
    pub fn is_configured(&self) -> bool {
        self.inner.config.is_configured()
    }

    /// Get a clone of the current configuration (for debugging).
    pub fn config(&self) -> Result<Config> {
        self.inner.config.config()
    }

    /// Access the underlying map renderer.
    pub fn renderer(&self) -> &MapRenderer {
        &self.inner.renderer
    }

    /// Fetch a page of available ships.
    pub async fn fetch_ships(&self, options: FetchShipsOptions) -> Result<FetchShipsResponse> {
        api::fetch_ships(options).await
    }

    /// Load and render a map for an itinerary.
    ///
    /// Returns `true` on success; failures are logged and reported as
    /// `false`, never as an exception across the public boundary.
    pub async fn load_map(&self, params: LoadMapParams) -> bool {
        self.inner.renderer.load_map(params).await
    }

    /// Destroy the map instance in a container. Idempotent.
    pub async fn destroy(&self, container: &str) -> bool {
        self.inner.renderer.destroy(container).await
    }

    /// Propagate a container resize; `false` when nothing is registered.
    pub async fn resize_map(&self, container: &str) -> bool {
        self.inner.renderer.resize(container).await
    }

    /// Append a style id to the catalog; duplicate ids are a silent no-op.
    pub fn add_map_style(&self, style: impl Into<String>) -> Result<()> {
        self.inner.config.add_style(style)
    }

    /// Get the ordered style catalog.
    pub fn get_available_map_styles(&self) -> Result<Vec<String>> {
        self.inner.config.available_map_styles()
    }
}
