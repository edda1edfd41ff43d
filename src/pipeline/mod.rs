mod prepare;
mod run;

pub use prepare::{departments_from_layer, prepare_layer, PreparedFeature, PreparedLayer};
pub use run::{load_layers, run, run_with_source, LayerSet, PreparedLayers, RunReport};
