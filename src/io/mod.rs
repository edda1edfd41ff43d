//! Reading layers from disk and writing run outputs.
//!
//! - `shp` - shapefile layer source and inspection
//! - `prj` - reference-system detection from `.prj` sidecars
//! - `table` - CSV and JSON-records exports via polars
//! - `geojson` - map renderer hand-off
//! - `write` - atomic write-then-rename
//! - `export` - all outputs of one run

mod export;
mod geojson;
mod prj;
mod shp;
mod table;
mod write;

pub use export::{write_outputs, ANOMALIES_JSON, FINAL_CSV, FINAL_JSON, MAP_DIR, OVERLAP_CSV, SUMMARY_JSON};
pub use geojson::{departments_to_geojson, layer_to_geojson};
pub use prj::{detect_crs, read_prj};
pub use shp::{inspect, read_layer, shape_to_multipolygon, ShapefileInfo, ShapefileSource};
pub use table::{write_csv_bytes, write_json_records};
pub use write::{open_for_write, write_atomic, PendingWrite};
