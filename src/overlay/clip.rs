use std::sync::Arc;

use ahash::AHashSet;
use geo::{BooleanOps, MultiPolygon};
use rayon::prelude::*;

use crate::{anomaly::{Anomaly, AnomalyKind}, geom::{area_km2, Geometries}};

/// Department boundary polygons with an R-tree for bounding-box pruning.
#[derive(Debug, Clone)]
pub struct Departments {
    names: Vec<Arc<str>>,
    geoms: Geometries,
    canonical: AHashSet<Arc<str>>,
}

impl Departments {
    /// Build from (name, planar polygon) entries. A name may repeat when a
    /// department is split over several features.
    pub fn new(entries: Vec<(Arc<str>, MultiPolygon<f64>)>) -> Self {
        let (names, shapes): (Vec<_>, Vec<_>) = entries.into_iter().unzip();
        Self {
            canonical: names.iter().cloned().collect(),
            geoms: Geometries::new(shapes),
            names,
        }
    }

    /// Number of department polygons.
    #[inline] pub fn len(&self) -> usize { self.geoms.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.geoms.is_empty() }

    /// Name of the department polygon at `idx`.
    #[inline] pub fn name(&self, idx: usize) -> &Arc<str> { &self.names[idx] }

    /// Look up a department in the canonical list.
    #[inline] pub fn canonical(&self, name: &str) -> Option<&Arc<str>> { self.canonical.get(name) }

    /// Number of distinct department names.
    #[inline] pub fn num_names(&self) -> usize { self.canonical.len() }

    #[inline] pub(crate) fn geoms(&self) -> &Geometries { &self.geoms }
}

/// Something that can be clipped against departments.
pub trait Clippable: Sync {
    fn geometry(&self) -> &MultiPolygon<f64>;

    /// Identifier reported in fragments and anomalies; defaults to the
    /// position in the clipped slice.
    fn id(&self, position: usize) -> usize { position }
}

impl Clippable for MultiPolygon<f64> {
    fn geometry(&self) -> &MultiPolygon<f64> { self }
}

/// The part of one source shape that falls inside one department.
#[derive(Debug, Clone)]
pub struct DepartmentFragment {
    pub department: Arc<str>,
    /// Identifier of the source item (see `Clippable::id`).
    pub source: usize,
    pub geometry: MultiPolygon<f64>,
    pub area_km2: f64,
}

/// Clip one shape against every department whose bounding box it touches.
fn clip_shape(source: usize, shape: &MultiPolygon<f64>, departments: &Departments, label: &str)
    -> (Vec<DepartmentFragment>, Vec<Anomaly>)
{
    let mut fragments = Vec::new();
    let mut anomalies = Vec::new();

    for idx in departments.geoms().candidates(shape) {
        let piece = shape.intersection(departments.geoms().shape(idx));
        if piece.0.is_empty() { continue }

        match area_km2(&piece) {
            // Shared boundaries intersect with zero area; those are not fragments.
            Ok(area) if area > 0.0 => fragments.push(DepartmentFragment {
                department: departments.name(idx).clone(),
                source,
                geometry: piece,
                area_km2: area,
            }),
            Ok(_) => {}
            Err(err) => anomalies.push(Anomaly::record(
                AnomalyKind::InvalidArea, label, Some(source),
                format!("fragment in {}: {err}", departments.name(idx)),
            )),
        }
    }

    (fragments, anomalies)
}

/// Clip every item against the departments, in parallel across items.
///
/// Fragments come out in item order, then department order, so repeated
/// runs see identical sequences.
pub fn clip_to_departments<T: Clippable>(items: &[T], departments: &Departments, label: &str)
    -> (Vec<DepartmentFragment>, Vec<Anomaly>)
{
    let per_shape = items.par_iter()
        .enumerate()
        .map(|(position, item)| clip_shape(item.id(position), item.geometry(), departments, label))
        .collect::<Vec<_>>();

    let mut fragments = Vec::new();
    let mut anomalies = Vec::new();
    for (f, a) in per_shape {
        fragments.extend(f);
        anomalies.extend(a);
    }

    tracing::debug!(layer = label, shapes = items.len(), fragments = fragments.len(), "clipped to departments");
    (fragments, anomalies)
}
