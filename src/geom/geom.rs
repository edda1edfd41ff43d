use geo::{BoundingRect, MultiPolygon};
use rstar::RTree;
use smallvec::SmallVec;

use super::bbox::{envelope, BoundingBox};

/// Geometries holds a list of MultiPolygons with an R-tree over their bounding boxes.
///
/// Shapes without a bounding box (empty geometries) are kept for indexing
/// purposes but never returned as candidates.
#[derive(Debug, Clone)]
pub(crate) struct Geometries {
    shapes: Vec<MultiPolygon<f64>>,
    rtree: RTree<BoundingBox>,
}

impl Geometries {
    /// Construct a Geometries object from a vector of MultiPolygons.
    pub(crate) fn new(shapes: Vec<MultiPolygon<f64>>) -> Self {
        Self {
            rtree: RTree::bulk_load(
                shapes.iter().enumerate()
                    .filter_map(|(i, shape)| shape.bounding_rect().map(|rect| BoundingBox::new(i, rect)))
                    .collect()
            ),
            shapes,
        }
    }

    /// Get the number of MultiPolygons.
    #[inline] pub(crate) fn len(&self) -> usize { self.shapes.len() }

    /// Check if there are no MultiPolygons.
    #[inline] pub(crate) fn is_empty(&self) -> bool { self.shapes.is_empty() }

    /// Get a reference to the list of MultiPolygons.
    #[inline] pub(crate) fn shapes(&self) -> &[MultiPolygon<f64>] { &self.shapes }

    /// Get a reference to one MultiPolygon.
    #[inline] pub(crate) fn shape(&self, idx: usize) -> &MultiPolygon<f64> { &self.shapes[idx] }

    /// Indices of shapes whose bounding box intersects the bounding box of `shape`,
    /// in ascending index order so callers see candidates deterministically.
    pub(crate) fn candidates(&self, shape: &MultiPolygon<f64>) -> SmallVec<[usize; 8]> {
        let Some(rect) = shape.bounding_rect() else { return SmallVec::new() };
        let mut found = self.rtree
            .locate_in_envelope_intersecting(&envelope(&rect))
            .map(|bbox| bbox.idx())
            .collect::<SmallVec<[usize; 8]>>();
        found.sort_unstable();
        found
    }
}
