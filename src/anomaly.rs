use std::fmt;

use serde::Serialize;

/// Kinds of recoverable, feature- or fragment-level data problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    /// Repair left no valid area; the feature is excluded.
    UnrepairableGeometry,
    /// A coordinate could not be reprojected; the feature is excluded.
    ProjectionFailed,
    /// A computed area was negative or non-finite and was rejected.
    InvalidArea,
    /// A department feature has no usable name; the department is excluded.
    MissingDepartmentName,
    /// A fragment names a department outside the canonical list; it is dropped.
    UnknownDepartment,
}

/// A data-quality anomaly recorded during a run. The run continues.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anomaly {
    pub kind: AnomalyKind,
    /// Layer (or layer pair) the anomaly was found in.
    pub layer: String,
    /// Index of the offending feature within its layer, if applicable.
    pub feature: Option<usize>,
    pub detail: String,
}

impl Anomaly {
    /// Create an anomaly and log it.
    pub fn record(kind: AnomalyKind, layer: impl fmt::Display, feature: Option<usize>, detail: impl Into<String>) -> Self {
        let anomaly = Self { kind, layer: layer.to_string(), feature, detail: detail.into() };
        tracing::warn!(
            kind = ?anomaly.kind,
            layer = %anomaly.layer,
            feature = ?anomaly.feature,
            "{}", anomaly.detail
        );
        anomaly
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.feature {
            Some(idx) => write!(f, "[{:?}] {} #{}: {}", self.kind, self.layer, idx, self.detail),
            None => write!(f, "[{:?}] {}: {}", self.kind, self.layer, self.detail),
        }
    }
}
