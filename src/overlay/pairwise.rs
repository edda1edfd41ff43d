use std::{collections::BTreeMap, sync::Arc};

use geo::{BooleanOps, MultiPolygon};
use rayon::prelude::*;

use crate::{anomaly::Anomaly, geom::{planar_area, Geometries}, layer::PerTheme};
use super::{aggregate, clip_to_departments, Departments, LayerPair};

/// Overlap area of one layer pair, by department.
#[derive(Debug, Clone)]
pub struct PairOverlap {
    pub pair: LayerPair,
    /// Number of non-empty feature-by-feature intersections.
    pub pieces: usize,
    pub by_department: BTreeMap<Arc<str>, f64>,
}

/// Intersect every shape of `a` with every bounding-box candidate of `b`.
///
/// Attributes play no part; each non-empty intersection is one piece, in
/// (a, b) index order.
pub(crate) fn intersect_shapes(a: &[MultiPolygon<f64>], b: &Geometries) -> Vec<MultiPolygon<f64>> {
    a.par_iter()
        .map(|shape| {
            b.candidates(shape).into_iter()
                .map(|j| shape.intersection(b.shape(j)))
                .filter(|piece| !piece.0.is_empty() && planar_area(piece) > 0.0)
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

/// Overlap of a single pair: intersect, clip by department, sum areas.
fn overlap_pair(pair: LayerPair, layers: &PerTheme<Geometries>, departments: &Departments)
    -> (PairOverlap, Vec<Anomaly>)
{
    let label = pair.to_string();
    let pieces = intersect_shapes(layers[pair.first()].shapes(), &layers[pair.second()]);
    let (fragments, mut anomalies) = clip_to_departments(&pieces, departments, &label);
    let (totals, more) = aggregate(&fragments, departments, &label);
    anomalies.extend(more);

    tracing::debug!(pair = %label, pieces = pieces.len(), departments = totals.len(), "computed pair overlap");

    let by_department = totals.into_iter()
        .map(|(name, totals)| (name, totals.area_km2))
        .collect();
    (PairOverlap { pair, pieces: pieces.len(), by_department }, anomalies)
}

/// Compute the overlap of all six layer pairs, one parallel task per pair.
///
/// Results are returned in canonical pair order.
pub fn compute_overlaps(layers: PerTheme<&[MultiPolygon<f64>]>, departments: &Departments)
    -> (Vec<PairOverlap>, Vec<Anomaly>)
{
    let indexed = layers.map(|shapes| Geometries::new(shapes.to_vec()));

    let results = LayerPair::ALL.as_slice().par_iter()
        .map(|&pair| overlap_pair(pair, &indexed, departments))
        .collect::<Vec<_>>();

    let mut overlaps = Vec::with_capacity(results.len());
    let mut anomalies = Vec::new();
    for (overlap, a) in results {
        overlaps.push(overlap);
        anomalies.extend(a);
    }
    (overlaps, anomalies)
}
