#![doc = "Convergencia public API"]
mod anomaly;
mod config;
mod error;
mod geom;
mod layer;
mod overlay;
mod pipeline;
mod source;
mod table;

pub mod io;

#[doc(inline)]
pub use anomaly::{Anomaly, AnomalyKind};

#[doc(inline)]
pub use config::{AnalysisConfig, Config, InputPaths, OutputConfig};

#[doc(inline)]
pub use error::{AreaError, LayerError};

#[doc(inline)]
pub use geom::{area_km2, planar_area, repair, Crs, Projector, M2_PER_KM2};

#[doc(inline)]
pub use layer::{AttrValue, Attributes, Feature, Layer, LayerKind, PerTheme, Theme};

#[doc(inline)]
pub use overlay::{
    aggregate, clip_to_departments, compute_overlaps, Clippable, DepartmentFragment, DepartmentTotals,
    Departments, LayerPair, PairOverlap, PerPair,
};

#[doc(inline)]
pub use pipeline::{
    departments_from_layer, load_layers, prepare_layer, run, run_with_source, LayerSet, PreparedFeature,
    PreparedLayer, PreparedLayers, RunReport,
};

#[doc(inline)]
pub use source::{LayerSource, MemorySource};

#[doc(inline)]
pub use table::{
    compose, sort_descending, ColumnStats, FinalRow, FinalTable, OverlapRow, OverlapTable, RankingRow,
    RankingTable, SummaryRow, TableSummary, COLUMNS, DEPARTMENT_COLUMN,
};
