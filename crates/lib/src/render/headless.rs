//! In-memory rendering engine implementation.
//!
//! This module provides an in-memory implementation of the
//! [`RenderEngine`] trait, suitable for testing, development, or host
//! environments without a real drawing backend. It records every call made
//! into it — sources, layers, fitted bounds, 3-D effects, and an ordered
//! operation log — so callers can assert on the exact composition sequence.
//!
//! It also reproduces the real engine's failure modes: composing before
//! style readiness, attaching a layer whose source is missing, and
//! re-attaching an existing layer id all fail the way a real engine would.

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex, RwLock},
};

use async_trait::async_trait;

use crate::{
    Result,
    geometry::{FeatureCollection, LngLatBounds},
    render::{
        RenderError,
        engine::{Effects3d, FitBoundsOptions, LayerSpec, MapSurface, RenderEngine, SurfaceOptions},
    },
};

/// An in-memory rendering engine backed by plain maps and vectors.
///
/// Containers must be registered before a surface can be acquired in them,
/// mirroring a host page that owns a fixed set of container elements.
/// Surfaces remain inspectable after release so tests can verify teardown.
#[derive(Debug, Default)]
pub struct Headless {
    containers: RwLock<HashSet<String>>,
    surfaces: RwLock<HashMap<String, Arc<HeadlessSurface>>>,
}

impl Headless {
    /// Creates a new engine with no known containers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine that knows the given containers.
    pub fn with_containers<I, S>(containers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let engine = Self::new();
        {
            let mut known = engine.containers.write().unwrap();
            known.extend(containers.into_iter().map(Into::into));
        }
        engine
    }

    /// Make a container identifier resolvable.
    pub fn register_container(&self, container: impl Into<String>) {
        self.containers.write().unwrap().insert(container.into());
    }

    /// The most recently acquired surface for a container, if any.
    pub fn surface(&self, container: &str) -> Option<Arc<HeadlessSurface>> {
        self.surfaces.read().unwrap().get(container).cloned()
    }
}

#[async_trait]
impl RenderEngine for Headless {
    async fn acquire_surface(
        &self,
        container: &str,
        options: SurfaceOptions,
    ) -> Result<Arc<dyn MapSurface>> {
        if !self.containers.read().unwrap().contains(container) {
            return Err(RenderError::ContainerNotFound {
                container: container.to_string(),
            }
            .into());
        }

        let surface = Arc::new(HeadlessSurface::new(container, options));
        self.surfaces
            .write()
            .unwrap()
            .insert(container.to_string(), surface.clone());
        Ok(surface)
    }
}

#[derive(Debug, Default)]
struct SurfaceState {
    style_ready: bool,
    sources: HashMap<String, FeatureCollection>,
    layers: Vec<LayerSpec>,
    fitted: Option<(LngLatBounds, FitBoundsOptions)>,
    effects: Option<Effects3d>,
    resize_count: u32,
    removed: bool,
    ops: Vec<String>,
}

/// One recorded map surface created by [`Headless`].
#[derive(Debug)]
pub struct HeadlessSurface {
    container: String,
    options: SurfaceOptions,
    state: Mutex<SurfaceState>,
}

impl HeadlessSurface {
    fn new(container: &str, options: SurfaceOptions) -> Self {
        let mut state = SurfaceState::default();
        state.ops.push("acquire".to_string());
        Self {
            container: container.to_string(),
            options,
            state: Mutex::new(state),
        }
    }

    /// The options the surface was created with.
    pub fn options(&self) -> &SurfaceOptions {
        &self.options
    }

    /// Number of layers currently attached.
    pub fn layer_count(&self) -> usize {
        self.state.lock().unwrap().layers.len()
    }

    /// Ids of attached layers, in attachment order.
    pub fn layer_ids(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.layers.iter().map(|l| l.id.clone()).collect()
    }

    /// The registered data for a source, if any.
    pub fn source(&self, id: &str) -> Option<FeatureCollection> {
        self.state.lock().unwrap().sources.get(id).cloned()
    }

    /// The bounds the viewport was fitted to, if any.
    pub fn fitted_bounds(&self) -> Option<(LngLatBounds, FitBoundsOptions)> {
        self.state.lock().unwrap().fitted
    }

    /// The applied 3-D effects, if any.
    pub fn effects(&self) -> Option<Effects3d> {
        self.state.lock().unwrap().effects.clone()
    }

    /// How many times the surface has been resized.
    pub fn resize_count(&self) -> u32 {
        self.state.lock().unwrap().resize_count
    }

    /// Whether the surface has been released.
    pub fn is_removed(&self) -> bool {
        self.state.lock().unwrap().removed
    }

    /// The ordered log of operations performed on this surface.
    pub fn op_log(&self) -> Vec<String> {
        self.state.lock().unwrap().ops.clone()
    }

    fn guard_live(&self, state: &SurfaceState) -> Result<()> {
        if state.removed {
            return Err(RenderError::SurfaceReleased {
                container: self.container.clone(),
            }
            .into());
        }
        Ok(())
    }

    fn guard_ready(&self, state: &SurfaceState) -> Result<()> {
        self.guard_live(state)?;
        if !state.style_ready {
            return Err(RenderError::SurfaceNotReady {
                container: self.container.clone(),
            }
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl MapSurface for HeadlessSurface {
    async fn wait_style_ready(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        self.guard_live(&state)?;
        if !state.style_ready {
            state.style_ready = true;
            state.ops.push("style-ready".to_string());
        }
        Ok(())
    }

    async fn fit_bounds(&self, bounds: LngLatBounds, options: FitBoundsOptions) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        self.guard_ready(&state)?;
        state.fitted = Some((bounds, options));
        state.ops.push("fit-bounds".to_string());
        Ok(())
    }

    async fn set_geojson_source(&self, id: &str, data: &FeatureCollection) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        self.guard_ready(&state)?;
        state.sources.insert(id.to_string(), data.clone());
        state.ops.push(format!("set-source:{id}"));
        Ok(())
    }

    async fn add_layer(&self, layer: LayerSpec) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        self.guard_ready(&state)?;
        if state.layers.iter().any(|existing| existing.id == layer.id) {
            return Err(RenderError::LayerExists { layer: layer.id }.into());
        }
        if !state.sources.contains_key(&layer.source) {
            return Err(RenderError::MissingSource {
                layer: layer.id,
                source_id: layer.source,
            }
            .into());
        }
        state.ops.push(format!("add-layer:{}", layer.id));
        state.layers.push(layer);
        Ok(())
    }

    async fn has_layer(&self, id: &str) -> bool {
        let state = self.state.lock().unwrap();
        state.layers.iter().any(|layer| layer.id == id)
    }

    async fn apply_3d(&self, effects: &Effects3d) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        self.guard_ready(&state)?;
        state.effects = Some(effects.clone());
        state.ops.push("apply-3d".to_string());
        Ok(())
    }

    async fn resize(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        self.guard_live(&state)?;
        state.resize_count += 1;
        state.ops.push("resize".to_string());
        Ok(())
    }

    async fn remove(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        self.guard_live(&state)?;
        state.removed = true;
        state.ops.push("remove".to_string());
        Ok(())
    }
}
