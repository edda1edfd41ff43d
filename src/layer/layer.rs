use std::fmt;

use geo::MultiPolygon;

use crate::{error::LayerError, geom::Crs};
use super::{Attributes, Feature, Theme};

/// Which of the five input layers a layer (or feature) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LayerKind {
    Thematic(Theme),
    Departments,
}

impl LayerKind {
    pub const ALL: [LayerKind; 5] = [
        LayerKind::Thematic(Theme::Zrc),
        LayerKind::Thematic(Theme::Resguardo),
        LayerKind::Thematic(Theme::ConsejoComunitario),
        LayerKind::Thematic(Theme::ConflictZone),
        LayerKind::Departments,
    ];

    /// Short key used in config files and output file names.
    pub const fn key(self) -> &'static str {
        match self {
            LayerKind::Thematic(theme) => theme.key(),
            LayerKind::Departments => "departments",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        LayerKind::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerKind::Thematic(theme) => f.write_str(theme.label()),
            LayerKind::Departments => f.write_str("Departments"),
        }
    }
}

/// A named, ordered collection of features in one reference system.
#[derive(Debug, Clone)]
pub struct Layer {
    kind: LayerKind,
    crs: Option<Crs>,
    features: Vec<Feature>,
}

impl Layer {
    pub fn new(kind: LayerKind, crs: Option<Crs>, features: Vec<Feature>) -> Self {
        Self { kind, crs, features }
    }

    /// Build a layer from bare geometries, without attributes.
    pub fn from_shapes(kind: LayerKind, crs: Option<Crs>, shapes: Vec<MultiPolygon<f64>>) -> Self {
        let features = shapes.into_iter()
            .map(|shape| Feature::new(kind, shape, Attributes::new()))
            .collect();
        Self::new(kind, crs, features)
    }

    /// Replace the declared reference system.
    pub fn with_crs(mut self, crs: Crs) -> Self {
        self.crs = Some(crs);
        self
    }

    #[inline] pub fn kind(&self) -> LayerKind { self.kind }

    #[inline] pub fn crs(&self) -> Option<&Crs> { self.crs.as_ref() }

    #[inline] pub fn features(&self) -> &[Feature] { &self.features }

    #[inline] pub fn len(&self) -> usize { self.features.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.features.is_empty() }

    /// Check the layer is usable for measurement and return its reference system.
    pub fn validate(&self) -> Result<&Crs, LayerError> {
        if self.is_empty() { return Err(LayerError::Empty(self.kind)) }
        self.crs.as_ref().ok_or(LayerError::UnknownCrs(self.kind))
    }
}
