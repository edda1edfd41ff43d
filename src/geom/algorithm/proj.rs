use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, MapCoords, MultiPolygon};
use proj4rs::{proj::Proj as Proj4, transform::transform};

use crate::geom::Crs;

/// Forward coordinate transform between two reference systems.
///
/// proj4rs works in radians for geographic systems; the projector takes and
/// returns degrees so callers never see radians.
pub struct Projector {
    from: Proj4,
    to: Proj4,
    from_geographic: bool,
    to_geographic: bool,
    identity: bool,
}

impl Projector {
    pub fn new(from: &Crs, to: &Crs) -> Result<Self> {
        let build = |crs: &Crs| {
            Proj4::from_proj_string(crs.proj4())
                .with_context(|| anyhow!("failed to build PROJ.4: {}", crs.proj4()))
        };

        Ok(Self {
            from: build(from)?,
            to: build(to)?,
            from_geographic: from.is_geographic(),
            to_geographic: to.is_geographic(),
            identity: from == to,
        })
    }

    /// Whether the transform leaves coordinates untouched.
    #[inline] pub fn is_identity(&self) -> bool { self.identity }

    /// Transform a single coordinate.
    pub fn project_coord(&self, coord: Coord<f64>) -> Result<Coord<f64>> {
        if self.identity { return Ok(coord) }

        let mut point = if self.from_geographic {
            (coord.x.to_radians(), coord.y.to_radians(), 0.0)
        } else {
            (coord.x, coord.y, 0.0)
        };

        transform(&self.from, &self.to, &mut point)
            .with_context(|| format!("CRS transform failed at ({}, {})", coord.x, coord.y))?;

        let out = if self.to_geographic {
            Coord { x: point.0.to_degrees(), y: point.1.to_degrees() }
        } else {
            Coord { x: point.0, y: point.1 }
        };

        if !out.x.is_finite() || !out.y.is_finite() {
            bail!("CRS transform produced a non-finite coordinate at ({}, {})", coord.x, coord.y);
        }
        Ok(out)
    }

    /// Transform every coordinate of a geometry; no resampling or simplification.
    pub fn project(&self, shape: &MultiPolygon<f64>) -> Result<MultiPolygon<f64>> {
        if self.identity { return Ok(shape.clone()) }
        shape.try_map_coords(|coord| self.project_coord(coord))
    }
}

#[cfg(test)]
mod tests {
    use geo::{polygon, MultiPolygon};

    use super::*;

    #[test]
    fn identical_systems_are_identity() {
        let projector = Projector::new(&Crs::magna_bogota(), &Crs::magna_bogota()).unwrap();
        assert!(projector.is_identity());
        let c = Coord { x: 1_000_123.5, y: 998_000.25 };
        assert_eq!(projector.project_coord(c).unwrap(), c);
    }

    #[test]
    fn projection_origin_maps_to_false_easting_and_northing() {
        let projector = Projector::new(&Crs::wgs84(), &Crs::magna_bogota()).unwrap();
        let origin = projector
            .project_coord(Coord { x: -74.0775079166667, y: 4.59620041666667 })
            .unwrap();
        assert!((origin.x - 1_000_000.0).abs() < 1.0, "x = {}", origin.x);
        assert!((origin.y - 1_000_000.0).abs() < 1.0, "y = {}", origin.y);
    }

    #[test]
    fn geographic_round_trip_is_structurally_lossless() {
        let forward = Projector::new(&Crs::wgs84(), &Crs::magna_bogota()).unwrap();
        let back = Projector::new(&Crs::magna_bogota(), &Crs::wgs84()).unwrap();

        let shape = MultiPolygon::new(vec![polygon![
            (x: -75.5, y: 6.2), (x: -75.0, y: 6.2), (x: -75.0, y: 6.7), (x: -75.5, y: 6.7)
        ]]);
        let planar = forward.project(&shape).unwrap();
        let round_trip = back.project(&planar).unwrap();

        assert_eq!(round_trip.0.len(), shape.0.len());
        let before = shape.0[0].exterior().0.clone();
        let after = round_trip.0[0].exterior().0.clone();
        assert_eq!(before.len(), after.len());
        for (a, b) in before.iter().zip(after.iter()) {
            assert!((a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6, "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn planar_square_has_expected_ground_size() {
        // Half a degree near the projection origin is roughly 55 km in each direction.
        let projector = Projector::new(&Crs::wgs84(), &Crs::magna_bogota()).unwrap();
        let a = projector.project_coord(Coord { x: -74.0, y: 4.5 }).unwrap();
        let b = projector.project_coord(Coord { x: -73.5, y: 5.0 }).unwrap();
        assert!((b.x - a.x - 55_500.0).abs() < 1_000.0);
        assert!((b.y - a.y - 55_300.0).abs() < 1_000.0);
    }
}
