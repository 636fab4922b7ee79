//! Ordered, idempotent layer composition.
//!
//! Each attach operation is a no-op when the named layer is already present
//! on the surface. The track layer registers the shared `track-source` data
//! source and must be attached before the arrows and ports layers, which
//! read from that source by reference; attaching them first surfaces the
//! engine's missing-source failure.

use crate::{
    Result,
    config::{PortStyleConfig, TrackStyle},
    geometry::FeatureCollection,
    render::engine::{
        CircleStyle, Effects3d, GeometryFilter, LayerPaint, LayerSpec, LineStyle, MapSurface,
        SymbolStyle,
    },
};

/// Shared data source holding the itinerary geometry.
pub const TRACK_SOURCE: &str = "track-source";
/// Line layer drawing the voyage track.
pub const TRACK_LAYER: &str = "track-layer";
/// Circle layer drawing port markers.
pub const PORTS_LAYER: &str = "ports-layer";
/// Symbol layer drawing directional arrows along the track.
pub const ARROWS_LAYER: &str = "arrow-icons";

/// Opacity interpolation stops that declutter dense overlapping tracks:
/// full opacity below zoom 8, fading as the viewer zooms in.
const TRACK_ZOOM_OPACITY: [(f64, f64); 3] = [(8.0, 1.0), (9.0, 0.5), (10.0, 0.3)];

/// Register the itinerary as the shared data source and attach the track
/// line layer.
///
/// The source is registered (or replaced) on every call; the layer itself
/// is attached at most once.
pub async fn add_track_layer(
    surface: &dyn MapSurface,
    geometry: &FeatureCollection,
    style: Option<&TrackStyle>,
) -> Result<()> {
    let style = style.cloned().unwrap_or_default();

    surface.set_geojson_source(TRACK_SOURCE, geometry).await?;

    if surface.has_layer(TRACK_LAYER).await {
        return Ok(());
    }
    surface
        .add_layer(LayerSpec {
            id: TRACK_LAYER.to_string(),
            source: TRACK_SOURCE.to_string(),
            filter: None,
            paint: LayerPaint::Line(LineStyle {
                color: style.color,
                width: style.width,
                zoom_opacity: TRACK_ZOOM_OPACITY.to_vec(),
            }),
        })
        .await
}

/// Attach the port-marker layer over `Point` features.
///
/// Radius and color follow the three-way categorical rule on each feature's
/// `Feature_type` property; categories absent from `config` fall back to
/// the stock styles. All markers get a fixed white stroke and near-opaque
/// fill.
pub async fn add_ports_layer(surface: &dyn MapSurface, config: &PortStyleConfig) -> Result<()> {
    if surface.has_layer(PORTS_LAYER).await {
        return Ok(());
    }

    let start = config
        .start_port
        .clone()
        .unwrap_or_else(PortStyleConfig::default_start);
    let end = config
        .end_port
        .clone()
        .unwrap_or_else(PortStyleConfig::default_end);
    let intermediate = config
        .intermediate_ports
        .clone()
        .unwrap_or_else(PortStyleConfig::default_intermediate);

    surface
        .add_layer(LayerSpec {
            id: PORTS_LAYER.to_string(),
            source: TRACK_SOURCE.to_string(),
            filter: Some(GeometryFilter::Point),
            paint: LayerPaint::Circle(CircleStyle {
                start,
                end,
                intermediate,
                stroke_color: "#ffffff".to_string(),
                stroke_width: 2.0,
                opacity: 0.9,
            }),
        })
        .await
}

/// Attach the directional-arrow layer over `LineString` features.
pub async fn add_arrows_layer(surface: &dyn MapSurface) -> Result<()> {
    if surface.has_layer(ARROWS_LAYER).await {
        return Ok(());
    }

    surface
        .add_layer(LayerSpec {
            id: ARROWS_LAYER.to_string(),
            source: TRACK_SOURCE.to_string(),
            filter: Some(GeometryFilter::LineString),
            paint: LayerPaint::Symbol(SymbolStyle {
                glyph: "\u{25b6}".to_string(),
                size: 16.0,
                spacing: 60.0,
                color: "#ffffff".to_string(),
                halo_color: "#3498db".to_string(),
                halo_width: 2.0,
                allow_overlap: true,
            }),
        })
        .await
}

/// Push fog, sky, and terrain settings to the surface.
pub async fn apply_3d(surface: &dyn MapSurface, effects: &Effects3d) -> Result<()> {
    surface.apply_3d(effects).await
}
