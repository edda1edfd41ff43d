use geo::{LineString, MultiPolygon};

use crate::error::AreaError;

/// Square meters per square kilometer.
pub const M2_PER_KM2: f64 = 1_000_000.0;

/// Signed shoelace area of a closed ring (positive when counter-clockwise).
fn ring_signed_area(ring: &LineString<f64>) -> f64 {
    let mut twice_area = 0.0;
    for w in ring.0.windows(2) {
        twice_area += w[0].x * w[1].y - w[1].x * w[0].y;
    }
    twice_area / 2.0
}

/// Planar area in the units of the reference system (m² for metric CRSs).
///
/// Exterior rings count positive and holes negative regardless of their
/// stored orientation.
pub fn planar_area(shape: &MultiPolygon<f64>) -> f64 {
    shape.0.iter()
        .map(|polygon| {
            ring_signed_area(polygon.exterior()).abs()
                - polygon.interiors().iter()
                    .map(|hole| ring_signed_area(hole).abs())
                    .sum::<f64>()
        })
        .sum()
}

/// Area in km² of a geometry already in a metric planar reference system.
pub fn area_km2(shape: &MultiPolygon<f64>) -> Result<f64, AreaError> {
    let area = planar_area(shape) / M2_PER_KM2;
    if !area.is_finite() { return Err(AreaError::NonFinite(area)) }
    if area < 0.0 { return Err(AreaError::Negative(area)) }
    Ok(area)
}

#[cfg(test)]
mod tests {
    use geo::{polygon, Coord, LineString, MultiPolygon, Polygon};

    use super::*;

    fn ring(coords: &[(f64, f64)]) -> LineString<f64> {
        LineString::from(coords.iter().map(|&(x, y)| Coord { x, y }).collect::<Vec<_>>())
    }

    #[test]
    fn square_kilometer() {
        let shape = MultiPolygon::new(vec![polygon![
            (x: 0.0, y: 0.0), (x: 1000.0, y: 0.0), (x: 1000.0, y: 1000.0), (x: 0.0, y: 1000.0)
        ]]);
        assert!((area_km2(&shape).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn orientation_does_not_change_sign() {
        let ccw = ring(&[(0.0, 0.0), (2000.0, 0.0), (2000.0, 2000.0), (0.0, 2000.0), (0.0, 0.0)]);
        let cw = ring(&[(0.0, 0.0), (0.0, 2000.0), (2000.0, 2000.0), (2000.0, 0.0), (0.0, 0.0)]);
        let a = area_km2(&MultiPolygon::new(vec![Polygon::new(ccw, vec![])])).unwrap();
        let b = area_km2(&MultiPolygon::new(vec![Polygon::new(cw, vec![])])).unwrap();
        assert_eq!(a, b);
        assert!((a - 4.0).abs() < 1e-12);
    }

    #[test]
    fn holes_are_subtracted() {
        let exterior = ring(&[(0.0, 0.0), (3000.0, 0.0), (3000.0, 3000.0), (0.0, 3000.0), (0.0, 0.0)]);
        let hole = ring(&[(1000.0, 1000.0), (2000.0, 1000.0), (2000.0, 2000.0), (1000.0, 2000.0), (1000.0, 1000.0)]);
        let shape = MultiPolygon::new(vec![Polygon::new(exterior, vec![hole])]);
        assert!((area_km2(&shape).unwrap() - 8.0).abs() < 1e-12);
    }

    #[test]
    fn empty_geometry_has_zero_area() {
        assert_eq!(area_km2(&MultiPolygon::new(vec![])), Ok(0.0));
    }

    #[test]
    fn non_finite_and_negative_areas_are_rejected() {
        let nan = ring(&[(0.0, 0.0), (f64::NAN, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        let shape = MultiPolygon::new(vec![Polygon::new(nan, vec![])]);
        assert!(matches!(area_km2(&shape), Err(AreaError::NonFinite(_))));

        // A hole larger than its exterior is an upstream defect.
        let exterior = ring(&[(0.0, 0.0), (1000.0, 0.0), (1000.0, 1000.0), (0.0, 1000.0), (0.0, 0.0)]);
        let hole = ring(&[(0.0, 0.0), (2000.0, 0.0), (2000.0, 2000.0), (0.0, 2000.0), (0.0, 0.0)]);
        let shape = MultiPolygon::new(vec![Polygon::new(exterior, vec![hole])]);
        assert!(matches!(area_km2(&shape), Err(AreaError::Negative(_))));
    }
}
