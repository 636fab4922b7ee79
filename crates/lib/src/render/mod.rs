//!
//! Map-rendering orchestration: per-container instance lifecycle, geometry
//! bounds fitting, and ordered layer composition.
//!
//! [`MapRenderer`] drives the full `load_map` pipeline — acquire surface,
//! fetch geometry, wait for style readiness, fit bounds, compose layers,
//! register the instance — and owns the registry of live map instances
//! keyed by container identifier. Lifecycle operations never let errors
//! escape: failures are caught, logged, and reported as boolean outcomes
//! for UI-driven callers.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::{
    Result,
    api::itineraries::fetch_itinerary,
    config::{ConfigStore, MapConfig},
    geometry::{FeatureCollection, compute_bounds},
    network::NetworkClient,
};

pub mod engine;
pub mod errors;
pub mod headless;
pub mod layers;

pub use engine::{Effects3d, FitBoundsOptions, LayerSpec, MapSurface, RenderEngine, SurfaceOptions};
pub use errors::RenderError;
pub use headless::{Headless, HeadlessSurface};


/// Itinerary selector for a map load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadMapData {
    pub ship_id: i64,
    /// Voyage start as unix seconds.
    pub start_date: i64,
    /// Voyage length in seconds.
    pub duration: i64,
}

/// Parameters for [`MapRenderer::load_map`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadMapParams {
    /// Container identifier the surface is created in.
    pub container: String,
    pub data: LoadMapData,
    /// Per-map override; configured defaults apply when absent.
    #[serde(default)]
    pub map: Option<MapConfig>,
}

/// One live map instance.
struct MapInstance {
    surface: Arc<dyn MapSurface>,
    style: String,
    geometry: FeatureCollection,
}

/// Orchestrates per-container map lifecycles against a rendering engine.
///
/// At most one instance is live per container identifier; loading into an
/// occupied container replaces the prior instance and releases its engine
/// resources. The registry mutex makes create/replace/destroy atomic, but
/// a `destroy` racing a still-suspended `load_map` can observe the pending
/// completion re-register the container — there is no cancellation.
pub struct MapRenderer {
    config: ConfigStore,
    network: NetworkClient,
    engine: Arc<dyn RenderEngine>,
    registry: Mutex<HashMap<String, MapInstance>>,
}

impl MapRenderer {
    /// Create a renderer over the given engine.
    pub fn new(config: ConfigStore, network: NetworkClient, engine: Arc<dyn RenderEngine>) -> Self {
        Self {
            config,
            network,
            engine,
            registry: Mutex::new(HashMap::new()),
        }
    }

    /// Load and render a map for an itinerary.
    ///
    /// Returns `true` on success with the instance registered. Any failure
    /// is caught and logged; the surface acquired so far is released and
    /// the registry keeps whatever entry it had before the call.
    pub async fn load_map(&self, params: LoadMapParams) -> bool {
        let container = params.container.clone();
        match self.try_load(params).await {
            Ok(()) => {
                debug!(container, "map loaded");
                true
            }
            Err(err) => {
                error!(container, %err, "map creation failed");
                false
            }
        }
    }

    /// Destroy the map instance in a container.
    ///
    /// Succeeds (returns `true`) even when no instance is registered.
    pub async fn destroy(&self, container: &str) -> bool {
        let instance = self.registry.lock().unwrap().remove(container);
        if let Some(instance) = instance {
            if let Err(err) = instance.surface.remove().await {
                error!(container, %err, "failed to release map surface");
                return false;
            }
            debug!(container, "map destroyed");
        }
        true
    }

    /// Propagate a container resize to the engine.
    ///
    /// Returns `false` when no instance is registered; never propagates an
    /// error.
    pub async fn resize(&self, container: &str) -> bool {
        let surface = {
            let registry = self.registry.lock().unwrap();
            registry.get(container).map(|i| i.surface.clone())
        };
        match surface {
            Some(surface) => match surface.resize().await {
                Ok(()) => true,
                Err(err) => {
                    error!(container, %err, "failed to resize map");
                    false
                }
            },
            None => false,
        }
    }

    /// Check whether a container currently has a registered instance.
    pub fn is_registered(&self, container: &str) -> bool {
        self.registry.lock().unwrap().contains_key(container)
    }

    /// The style loaded into a container's instance, if one is registered.
    pub fn loaded_style(&self, container: &str) -> Option<String> {
        let registry = self.registry.lock().unwrap();
        registry.get(container).map(|i| i.style.clone())
    }

    /// The geometry currently fit to a container's viewport, if registered.
    pub fn loaded_geometry(&self, container: &str) -> Option<FeatureCollection> {
        let registry = self.registry.lock().unwrap();
        registry.get(container).map(|i| i.geometry.clone())
    }

    async fn try_load(&self, params: LoadMapParams) -> Result<()> {
        let map_config = match params.map.clone() {
            Some(config) => config,
            None => self.config.map_defaults()?,
        };

        let surface = self
            .engine
            .acquire_surface(
                &params.container,
                SurfaceOptions {
                    style: map_config.map_style.clone(),
                    center: map_config.center,
                    zoom: map_config.zoom_level,
                    width: map_config.width,
                    height: map_config.height,
                    interactive: !map_config.is_static,
                },
            )
            .await?;

        match self.compose(surface.as_ref(), &map_config, &params).await {
            Ok(geometry) => {
                let replaced = {
                    let mut registry = self.registry.lock().unwrap();
                    registry.insert(
                        params.container.clone(),
                        MapInstance {
                            surface,
                            style: map_config.map_style,
                            geometry,
                        },
                    )
                };
                // Replacing an instance implicitly destroys the old one.
                if let Some(old) = replaced {
                    if let Err(err) = old.surface.remove().await {
                        warn!(container = params.container, %err, "failed to release replaced surface");
                    }
                }
                Ok(())
            }
            Err(err) => {
                // Rollback: release the partially acquired surface and leave
                // the registry untouched.
                if let Err(release_err) = surface.remove().await {
                    warn!(container = params.container, %release_err, "failed to release surface after load failure");
                }
                Err(err)
            }
        }
    }

    async fn compose(
        &self,
        surface: &dyn MapSurface,
        map_config: &MapConfig,
        params: &LoadMapParams,
    ) -> Result<FeatureCollection> {
        let geometry = fetch_itinerary(
            &self.network,
            &self.config,
            params.data.ship_id,
            params.data.start_date,
            params.data.duration,
        )
        .await
        .map_err(|err| RenderError::GeometryFetchFailed {
            container: params.container.clone(),
            reason: err.to_string(),
        })?;

        // Composing layers before the style-ready signal is undefined
        // behavior in the rendering engine.
        surface.wait_style_ready().await?;

        match compute_bounds(&geometry) {
            Some(bounds) => {
                surface
                    .fit_bounds(bounds, FitBoundsOptions::default())
                    .await?;
            }
            None => {
                warn!(
                    container = params.container,
                    "itinerary has no usable coordinates, skipping viewport fit"
                );
            }
        }

        // Track first: it creates the shared data source the arrows and
        // ports layers read from.
        layers::add_track_layer(surface, &geometry, map_config.track_style.as_ref()).await?;
        if map_config.has_arrows {
            layers::add_arrows_layer(surface).await?;
        }
        layers::add_ports_layer(surface, &map_config.port_style).await?;
        if map_config.is_3d {
            layers::apply_3d(surface, &Effects3d::default()).await?;
        }

        Ok(geometry)
    }
}
