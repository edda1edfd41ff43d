use geo::{orient::Direction, unary_union, Coord, LineString, MultiPolygon, Orient, Polygon};

use super::area::planar_area;

/// Drop non-finite and consecutive duplicate coordinates from a ring.
/// Returns `None` if fewer than three distinct vertices remain.
fn clean_ring(ring: &LineString<f64>) -> Option<LineString<f64>> {
    let mut coords: Vec<Coord<f64>> = Vec::with_capacity(ring.0.len());
    for &c in ring.0.iter().filter(|c| c.x.is_finite() && c.y.is_finite()) {
        if coords.last() != Some(&c) { coords.push(c) }
    }
    // Open the ring for counting; Polygon::new closes it again.
    if coords.len() > 1 && coords.first() == coords.last() { coords.pop(); }
    (coords.len() >= 3).then(|| LineString::from(coords))
}

/// Rebuild each polygon from rings that can carry area, wound consistently;
/// polygons whose exterior is unusable are dropped along with their holes.
fn clean(shape: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    MultiPolygon::new(
        shape.0.iter()
            .filter_map(|polygon| {
                let exterior = clean_ring(polygon.exterior())?;
                let interiors = polygon.interiors().iter().filter_map(clean_ring).collect();
                Some(Polygon::new(exterior, interiors).orient(Direction::Default))
            })
            .collect()
    )
}

/// Repair a possibly self-intersecting or degenerate geometry.
///
/// This is the equivalent of a zero-distance buffer: the parts are merged
/// under a winding fill rule, which nodes every edge crossing and rebuilds
/// valid rings from the arrangement. Overlapping or repeated parts collapse
/// into their union. The result is empty when no area remains.
pub fn repair(shape: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    let cleaned = clean(shape);
    if cleaned.0.is_empty() { return cleaned }

    let rebuilt = unary_union(cleaned.0.iter());
    MultiPolygon::new(
        rebuilt.into_iter()
            .filter(|polygon| {
                let area = planar_area(&MultiPolygon::new(vec![polygon.clone()]));
                area.is_finite() && area > 0.0
            })
            .collect()
    )
}
