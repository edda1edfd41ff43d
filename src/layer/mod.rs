mod attr;
mod feature;
mod layer;
mod theme;

pub use attr::{AttrValue, Attributes};
pub use feature::Feature;
pub use layer::{Layer, LayerKind};
pub use theme::{PerTheme, Theme};
