use std::fmt;

use crate::layer::LayerKind;

/// Layer-level problems. Any of these invalidates the whole table, so a run
/// that hits one aborts without producing partial output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerError {
    /// The layer source has no such layer.
    Missing(LayerKind),
    /// The layer exists but holds no features.
    Empty(LayerKind),
    /// The layer has no declared or recognised reference system.
    UnknownCrs(LayerKind),
    /// No department feature carries the department-name attribute.
    MissingDepartmentField(String),
}

impl fmt::Display for LayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerError::Missing(kind) => write!(f, "required layer {kind} is missing"),
            LayerError::Empty(kind) => write!(f, "required layer {kind} has no features"),
            LayerError::UnknownCrs(kind) => write!(f, "layer {kind} has no known reference system"),
            LayerError::MissingDepartmentField(field) => {
                write!(f, "no department feature carries the {field:?} attribute")
            }
        }
    }
}

impl std::error::Error for LayerError {}

/// A computed area that cannot be stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AreaError {
    NonFinite(f64),
    Negative(f64),
}

impl fmt::Display for AreaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaError::NonFinite(value) => write!(f, "non-finite area: {value}"),
            AreaError::Negative(value) => write!(f, "negative area: {value}"),
        }
    }
}

impl std::error::Error for AreaError {}
