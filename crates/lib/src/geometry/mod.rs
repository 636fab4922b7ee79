//!
//! Itinerary geometry: GeoJSON-shaped data model and bounding-region
//! computation.
//!
//! The backend returns a `FeatureCollection` of points and lines with
//! categorical port markers. Coordinates are kept as raw
//! [`serde_json::Value`] so that payloads with malformed coordinates still
//! deserialize; bounds computation silently skips anything that is not a
//! numeric `[longitude, latitude]` pair.

use serde::{Deserialize, Serialize};
use serde_json::Value;


/// Property key carrying the categorical port marker.
pub const FEATURE_TYPE_PROPERTY: &str = "Feature_type";

/// A GeoJSON-like feature collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default = "FeatureCollection::type_name")]
    pub kind: String,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    fn type_name() -> String {
        "FeatureCollection".to_string()
    }

    /// An empty collection.
    pub fn empty() -> Self {
        Self {
            kind: Self::type_name(),
            features: Vec::new(),
        }
    }

    /// A collection owning the given features.
    pub fn from_features(features: Vec<Feature>) -> Self {
        Self {
            kind: Self::type_name(),
            features,
        }
    }
}

/// A single feature: optional geometry plus a free-form property bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default = "Feature::type_name")]
    pub kind: String,
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: serde_json::Map<String, Value>,
}

impl Feature {
    fn type_name() -> String {
        "Feature".to_string()
    }

    /// A point feature, optionally tagged with a `Feature_type` marker.
    pub fn point(lng: f64, lat: f64, feature_type: Option<&str>) -> Self {
        let mut properties = serde_json::Map::new();
        if let Some(kind) = feature_type {
            properties.insert(
                FEATURE_TYPE_PROPERTY.to_string(),
                Value::String(kind.to_string()),
            );
        }
        Self {
            kind: Self::type_name(),
            geometry: Some(Geometry {
                kind: "Point".to_string(),
                coordinates: serde_json::json!([lng, lat]),
            }),
            properties,
        }
    }

    /// A line-string feature over `[lng, lat]` pairs.
    pub fn line_string(coordinates: &[[f64; 2]]) -> Self {
        Self {
            kind: Self::type_name(),
            geometry: Some(Geometry {
                kind: "LineString".to_string(),
                coordinates: serde_json::json!(coordinates),
            }),
            properties: serde_json::Map::new(),
        }
    }

    /// Classify this feature's port marker from its `Feature_type` property.
    pub fn port_kind(&self) -> PortKind {
        match self
            .properties
            .get(FEATURE_TYPE_PROPERTY)
            .and_then(Value::as_str)
        {
            Some("start") => PortKind::Start,
            Some("end") => PortKind::End,
            _ => PortKind::Intermediate,
        }
    }
}

/// Feature geometry with a raw coordinates payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Value,
}

/// Categorical port marker: start, end, or anything else (including absent).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortKind {
    Start,
    End,
    Intermediate,
}

/// Minimal axis-aligned region covering a set of coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LngLatBounds {
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

impl LngLatBounds {
    /// A degenerate region containing a single coordinate.
    pub fn point(lng: f64, lat: f64) -> Self {
        Self {
            min_lng: lng,
            min_lat: lat,
            max_lng: lng,
            max_lat: lat,
        }
    }

    /// Grow the region to include the given coordinate.
    pub fn extend(&mut self, lng: f64, lat: f64) {
        self.min_lng = self.min_lng.min(lng);
        self.min_lat = self.min_lat.min(lat);
        self.max_lng = self.max_lng.max(lng);
        self.max_lat = self.max_lat.max(lat);
    }
}

/// Compute the minimal bounding region covering every valid coordinate in
/// the collection.
///
/// `Point` contributes its single coordinate, `LineString` every coordinate
/// in sequence, `MultiLineString` every coordinate of every sub-line. A
/// coordinate is valid only if it is an array whose first two elements are
/// numbers; invalid coordinates are skipped without error. Returns `None`
/// when no valid coordinate was found — callers must treat that as "do not
/// fit the viewport", not as a failure.
pub fn compute_bounds(collection: &FeatureCollection) -> Option<LngLatBounds> {
    let mut bounds: Option<LngLatBounds> = None;

    let mut push = |coordinate: &Value| {
        if let Some((lng, lat)) = as_lng_lat(coordinate) {
            match &mut bounds {
                Some(region) => region.extend(lng, lat),
                None => bounds = Some(LngLatBounds::point(lng, lat)),
            }
        }
    };

    for feature in &collection.features {
        let Some(geometry) = &feature.geometry else {
            continue;
        };
        match geometry.kind.as_str() {
            "Point" => push(&geometry.coordinates),
            "LineString" => {
                if let Some(coordinates) = geometry.coordinates.as_array() {
                    for coordinate in coordinates {
                        push(coordinate);
                    }
                }
            }
            "MultiLineString" => {
                if let Some(lines) = geometry.coordinates.as_array() {
                    for line in lines {
                        if let Some(coordinates) = line.as_array() {
                            for coordinate in coordinates {
                                push(coordinate);
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }

    bounds
}

fn as_lng_lat(value: &Value) -> Option<(f64, f64)> {
    let pair = value.as_array()?;
    if pair.len() < 2 {
        return None;
    }
    Some((pair[0].as_f64()?, pair[1].as_f64()?))
}
