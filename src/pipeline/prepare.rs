use std::sync::Arc;

use anyhow::{Context, Result};
use geo::MultiPolygon;
use rayon::prelude::*;

use crate::{
    anomaly::{Anomaly, AnomalyKind},
    error::LayerError,
    geom::{area_km2, repair, Crs, Projector},
    layer::{Attributes, Layer, LayerKind},
    overlay::{Clippable, Departments},
};

/// A repaired feature in the planar reference system.
#[derive(Debug, Clone)]
pub struct PreparedFeature {
    /// Position of the feature in its source layer.
    pub index: usize,
    pub geometry: MultiPolygon<f64>,
    pub area_km2: f64,
    pub attributes: Attributes,
}

impl Clippable for PreparedFeature {
    fn geometry(&self) -> &MultiPolygon<f64> { &self.geometry }

    fn id(&self, _position: usize) -> usize { self.index }
}

/// A layer whose surviving features are valid and planar.
#[derive(Debug, Clone)]
pub struct PreparedLayer {
    kind: LayerKind,
    crs: Crs,
    source_len: usize,
    features: Vec<PreparedFeature>,
}

impl PreparedLayer {
    #[inline] pub fn kind(&self) -> LayerKind { self.kind }

    /// The planar reference system the geometries are in.
    #[inline] pub fn crs(&self) -> &Crs { &self.crs }

    #[inline] pub fn features(&self) -> &[PreparedFeature] { &self.features }

    #[inline] pub fn len(&self) -> usize { self.features.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.features.is_empty() }

    /// Number of features in the layer before anything was excluded.
    #[inline] pub fn source_len(&self) -> usize { self.source_len }

    /// Sum of per-feature areas.
    pub fn total_area_km2(&self) -> f64 {
        self.features.iter().map(|f| f.area_km2).sum()
    }

    /// Copy out the planar geometries in feature order.
    pub fn shapes(&self) -> Vec<MultiPolygon<f64>> {
        self.features.iter().map(|f| f.geometry.clone()).collect()
    }
}

/// Repair every feature, project it to `planar` and measure it.
///
/// Repair runs in parallel; features that cannot be repaired, projected or
/// measured are excluded and reported. Layer-level problems are fatal.
pub fn prepare_layer(layer: &Layer, planar: &Crs) -> Result<(PreparedLayer, Vec<Anomaly>)> {
    let kind = layer.kind();
    let source_crs = layer.validate()?;
    let projector = Projector::new(source_crs, planar)
        .with_context(|| format!("[pipeline] Failed to build projection for layer {kind}"))?;

    let repaired = layer.features().par_iter()
        .map(|feature| repair(feature.geometry()))
        .collect::<Vec<_>>();

    let mut features = Vec::with_capacity(layer.len());
    let mut anomalies = Vec::new();

    for (index, (feature, shape)) in layer.features().iter().zip(repaired).enumerate() {
        if shape.0.is_empty() {
            anomalies.push(Anomaly::record(
                AnomalyKind::UnrepairableGeometry, kind, Some(index), "no area left after repair",
            ));
            continue
        }

        let geometry = match projector.project(&shape) {
            Ok(geometry) => geometry,
            Err(err) => {
                anomalies.push(Anomaly::record(AnomalyKind::ProjectionFailed, kind, Some(index), format!("{err:#}")));
                continue
            }
        };

        match area_km2(&geometry) {
            Ok(area) if area > 0.0 => features.push(PreparedFeature {
                index,
                geometry,
                area_km2: area,
                attributes: feature.attributes().clone(),
            }),
            Ok(_) => anomalies.push(Anomaly::record(
                AnomalyKind::InvalidArea, kind, Some(index), "zero area after projection",
            )),
            Err(err) => anomalies.push(Anomaly::record(AnomalyKind::InvalidArea, kind, Some(index), err.to_string())),
        }
    }

    tracing::info!(
        layer = %kind,
        features = layer.len(),
        kept = features.len(),
        from = %source_crs,
        to = %planar,
        "prepared layer"
    );

    let prepared = PreparedLayer { kind, crs: planar.clone(), source_len: layer.len(), features };
    Ok((prepared, anomalies))
}

/// Build the department index from a prepared department layer.
///
/// Features without a usable name are excluded and reported. Having no named
/// department at all is fatal.
pub fn departments_from_layer(layer: &PreparedLayer, field: &str) -> Result<(Departments, Vec<Anomaly>)> {
    if layer.is_empty() {
        return Err(LayerError::Empty(layer.kind()).into());
    }

    let mut entries = Vec::with_capacity(layer.len());
    let mut anomalies = Vec::new();

    for feature in layer.features() {
        match feature.attributes.get(field).and_then(|value| value.as_text()) {
            Some(name) => entries.push((Arc::<str>::from(name), feature.geometry.clone())),
            None => anomalies.push(Anomaly::record(
                AnomalyKind::MissingDepartmentName, layer.kind(), Some(feature.index),
                format!("no text value for {field:?}"),
            )),
        }
    }

    if entries.is_empty() {
        return Err(LayerError::MissingDepartmentField(field.to_string()).into());
    }

    let departments = Departments::new(entries);
    tracing::info!(polygons = departments.len(), names = departments.num_names(), "indexed departments");
    Ok((departments, anomalies))
}
