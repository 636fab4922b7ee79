//! Rendering-engine abstractions.
//!
//! The SDK never draws anything itself; it issues calls into an external
//! rendering engine through the [`RenderEngine`] / [`MapSurface`] trait
//! pair. Engine adapters (a WebGL map library, a native renderer, or the
//! in-tree [`Headless`](super::Headless) engine) implement these traits;
//! the SDK specifies only which calls are made, in what order, and why.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    config::PortStyle,
    geometry::{FeatureCollection, LngLatBounds},
};

/// Parameters for creating a map surface inside a container.
///
/// The engine is expected to clear any prior container content and apply
/// the requested dimensions before creating the map object.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceOptions {
    pub style: String,
    /// Initial center as `[longitude, latitude]`.
    pub center: [f64; 2],
    pub zoom: f64,
    pub width: u32,
    pub height: u32,
    pub interactive: bool,
}

/// Viewport-fitting parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitBoundsOptions {
    pub padding: f64,
    pub max_zoom: f64,
}

impl Default for FitBoundsOptions {
    fn default() -> Self {
        Self {
            padding: 50.0,
            max_zoom: 12.0,
        }
    }
}

/// Restricts a layer to features of one geometry kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFilter {
    Point,
    LineString,
}

/// Line paint: color, width, and opacity decreasing across zoom breakpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
    /// `(zoom, opacity)` interpolation stops.
    pub zoom_opacity: Vec<(f64, f64)>,
}

/// Circle paint with the three-way categorical port rule.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleStyle {
    pub start: PortStyle,
    pub end: PortStyle,
    pub intermediate: PortStyle,
    pub stroke_color: String,
    pub stroke_width: f64,
    pub opacity: f64,
}

/// Line-following glyph paint for directional arrows.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolStyle {
    pub glyph: String,
    pub size: f64,
    /// Spacing between glyph placements along the line.
    pub spacing: f64,
    pub color: String,
    pub halo_color: String,
    pub halo_width: f64,
    pub allow_overlap: bool,
}

/// Paint properties by layer kind.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerPaint {
    Line(LineStyle),
    Circle(CircleStyle),
    Symbol(SymbolStyle),
}

/// A named visual layer reading from a registered data source.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    pub id: String,
    pub source: String,
    pub filter: Option<GeometryFilter>,
    pub paint: LayerPaint,
}

/// Atmosphere/fog settings for 3-D rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FogConfig {
    pub color: String,
    pub high_color: String,
    pub horizon_blend: f64,
    pub space_color: String,
    pub star_intensity: f64,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            color: "#ffffff".to_string(),
            high_color: "#245cdf".to_string(),
            horizon_blend: 0.2,
            space_color: "#000000".to_string(),
            star_intensity: 0.15,
        }
    }
}

/// Sky/atmosphere settings for 3-D rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkyConfig {
    /// Sun position as `[azimuth, polar]` degrees.
    pub sun_position: [f64; 2],
    pub sun_intensity: f64,
    pub atmosphere_color: String,
    pub halo_color: String,
    pub opacity: f64,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            sun_position: [0.0, 0.0],
            sun_intensity: 15.0,
            atmosphere_color: "#89b3d9".to_string(),
            halo_color: "#ffffff".to_string(),
            opacity: 0.8,
        }
    }
}

/// Terrain exaggeration settings for 3-D rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerrainConfig {
    pub exaggeration: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self { exaggeration: 1.5 }
    }
}

/// The 3-D capability toggle pushed to a surface: fog, sky, and terrain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effects3d {
    pub fog: FogConfig,
    pub sky: SkyConfig,
    pub terrain: TerrainConfig,
}

/// Factory for map surfaces, keyed by container identifier.
#[async_trait]
pub trait RenderEngine: Send + Sync {
    /// Resolve the container and create a map surface inside it.
    ///
    /// Fails with [`RenderError::ContainerNotFound`](super::RenderError::ContainerNotFound)
    /// when the container identifier resolves to nothing.
    async fn acquire_surface(
        &self,
        container: &str,
        options: SurfaceOptions,
    ) -> Result<Arc<dyn MapSurface>>;
}

/// One live map object inside a container.
///
/// Composition calls (`set_geojson_source`, `add_layer`, `fit_bounds`,
/// `apply_3d`) are undefined behavior in real engines until the one-shot
/// style-ready signal has fired; callers must await [`MapSurface::wait_style_ready`]
/// first.
#[async_trait]
pub trait MapSurface: Send + Sync {
    /// Await the engine's one-time "style ready" signal for this surface.
    async fn wait_style_ready(&self) -> Result<()>;

    /// Fit the viewport to the given bounding region.
    async fn fit_bounds(&self, bounds: LngLatBounds, options: FitBoundsOptions) -> Result<()>;

    /// Register (or replace) a named GeoJSON data source.
    async fn set_geojson_source(&self, id: &str, data: &FeatureCollection) -> Result<()>;

    /// Attach a named layer. Fails if the layer id already exists or its
    /// source has not been registered.
    async fn add_layer(&self, layer: LayerSpec) -> Result<()>;

    /// Check whether a layer with this id is attached.
    async fn has_layer(&self, id: &str) -> bool;

    /// Apply atmosphere, sky, and terrain settings.
    async fn apply_3d(&self, effects: &Effects3d) -> Result<()>;

    /// Propagate a container resize to the engine.
    async fn resize(&self) -> Result<()>;

    /// Tear down the map object and release engine resources.
    async fn remove(&self) -> Result<()>;
}
