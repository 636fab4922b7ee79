//! Error types for the rendering module.

use thiserror::Error;

/// Errors that can occur during map lifecycle operations.
///
/// These never cross the public boolean-returning API (`load_map`,
/// `destroy`, `resize_map`); they are caught, logged, and folded into the
/// reported outcome.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
    /// The caller-supplied container identifier resolved to nothing.
    #[error("Container '{container}' not found")]
    ContainerNotFound { container: String },

    /// The itinerary fetch yielded no usable geometry.
    #[error("Failed to fetch itinerary geometry for container '{container}': {reason}")]
    GeometryFetchFailed { container: String, reason: String },

    /// A layer referenced a data source that has not been registered.
    ///
    /// This is the rendering engine's failure mode for composing layers out
    /// of order: the track layer creates the shared source and must be
    /// attached before ports or arrows.
    #[error("Layer '{layer}' references missing source '{source_id}'")]
    MissingSource { layer: String, source_id: String },

    /// A layer with this identifier is already attached to the surface.
    #[error("Layer '{layer}' already exists on this surface")]
    LayerExists { layer: String },

    /// A composition call arrived before the surface signalled style
    /// readiness; this is undefined behavior in the rendering engine.
    #[error("Surface for container '{container}' is not ready for composition")]
    SurfaceNotReady { container: String },

    /// The surface has already been released.
    #[error("Surface for container '{container}' has been released")]
    SurfaceReleased { container: String },

    /// Opaque failure reported by the rendering engine.
    #[error("Rendering engine error: {reason}")]
    Engine { reason: String },
}

impl RenderError {
    /// Check if this error indicates a missing container.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RenderError::ContainerNotFound { .. })
    }

    /// Check if this error is a layer-ordering violation.
    pub fn is_ordering_error(&self) -> bool {
        matches!(
            self,
            RenderError::MissingSource { .. } | RenderError::SurfaceNotReady { .. }
        )
    }
}
