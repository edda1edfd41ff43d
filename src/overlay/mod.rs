mod aggregate;
mod clip;
mod pair;
mod pairwise;

pub use aggregate::{aggregate, DepartmentTotals};
pub use clip::{clip_to_departments, Clippable, DepartmentFragment, Departments};
pub use pair::{LayerPair, PerPair};
pub use pairwise::{compute_overlaps, PairOverlap};
