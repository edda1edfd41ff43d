mod algorithm;
mod bbox;
mod crs;
mod geom;

pub use algorithm::{area_km2, planar_area, repair, Projector, M2_PER_KM2};
pub use crs::Crs;
pub(crate) use geom::Geometries;
