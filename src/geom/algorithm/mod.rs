mod area;
mod proj;
mod repair;

pub use area::{area_km2, planar_area, M2_PER_KM2};
pub use proj::Projector;
pub use repair::repair;
