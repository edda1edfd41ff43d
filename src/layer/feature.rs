use geo::MultiPolygon;

use super::{AttrValue, Attributes, LayerKind};

/// A geometry plus its attributes, tagged with the layer it came from.
#[derive(Debug, Clone)]
pub struct Feature {
    source: LayerKind,
    geometry: MultiPolygon<f64>,
    attributes: Attributes,
}

impl Feature {
    pub fn new(source: LayerKind, geometry: MultiPolygon<f64>, attributes: Attributes) -> Self {
        Self { source, geometry, attributes }
    }

    /// Add or replace one attribute.
    pub fn with_attribute(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    #[inline] pub fn source(&self) -> LayerKind { self.source }

    #[inline] pub fn geometry(&self) -> &MultiPolygon<f64> { &self.geometry }

    #[inline] pub fn attributes(&self) -> &Attributes { &self.attributes }

    #[inline] pub fn attribute(&self, name: &str) -> Option<&AttrValue> { self.attributes.get(name) }
}
