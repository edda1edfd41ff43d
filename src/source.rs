use std::collections::HashMap;

use anyhow::Result;

use crate::layer::{Layer, LayerKind};

/// Read-only access to the five input layers.
///
/// `Ok(None)` means the source has no such layer; the pipeline turns that
/// into a fatal `LayerError::Missing`.
pub trait LayerSource: Send + Sync {
    fn load(&self, kind: LayerKind) -> Result<Option<Layer>>;
}

/// Simple in-memory layer source.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    layers: HashMap<LayerKind, Layer>,
}

impl MemorySource {
    pub fn new() -> Self { Self::default() }

    /// Add a layer, replacing any previous layer of the same kind.
    pub fn with(mut self, layer: Layer) -> Self {
        self.insert(layer);
        self
    }

    pub fn insert(&mut self, layer: Layer) {
        self.layers.insert(layer.kind(), layer);
    }
}

impl LayerSource for MemorySource {
    fn load(&self, kind: LayerKind) -> Result<Option<Layer>> {
        Ok(self.layers.get(&kind).cloned())
    }
}
