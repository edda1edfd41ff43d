use std::{
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::{
    config::Config,
    layer::LayerKind,
    pipeline::RunReport,
    table::sort_descending,
};
use super::{
    geojson::{departments_to_geojson, layer_to_geojson},
    table::{write_csv_bytes, write_json_records},
    write::open_for_write,
};

pub const FINAL_CSV: &str = "tabla_final.csv";
pub const FINAL_JSON: &str = "tabla_final_min.json";
pub const OVERLAP_CSV: &str = "tabla_superposicion_departamento.csv";
pub const SUMMARY_JSON: &str = "resumen.json";
pub const ANOMALIES_JSON: &str = "anomalias.json";
pub const MAP_DIR: &str = "mapa";

fn json_bytes<T: Serialize>(name: &str, value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(value).with_context(|| format!("[io::export] Failed to serialize {name}"))
}

/// Render every output of a run, keyed by path relative to the output dir.
fn render(report: &RunReport, config: &Config) -> Result<Vec<(PathBuf, Vec<u8>)>> {
    let mut outputs = Vec::new();

    let ranked = sort_descending(&report.table.to_dataframe()?, "area_res_km2")?;
    outputs.push((FINAL_CSV.into(), write_csv_bytes(&ranked)?));
    outputs.push((FINAL_JSON.into(), write_json_records(&ranked)?));

    let overlaps = sort_descending(&report.overlaps.to_dataframe()?, "area_total_super_km2")?;
    outputs.push((OVERLAP_CSV.into(), write_csv_bytes(&overlaps)?));

    let summary = report.table.summary(config.output.summary_rows);
    outputs.push((SUMMARY_JSON.into(), json_bytes(SUMMARY_JSON, &summary)?));
    outputs.push((ANOMALIES_JSON.into(), json_bytes(ANOMALIES_JSON, &report.anomalies)?));

    if config.output.geojson {
        let analysis = &config.analysis;
        for kind in LayerKind::ALL {
            let layer = report.layers.get(kind);
            let value = match kind {
                LayerKind::Thematic(_) => layer_to_geojson(layer, &analysis.geographic_crs)?,
                LayerKind::Departments => departments_to_geojson(
                    layer, &analysis.department_field, &report.table, &analysis.geographic_crs,
                )?,
            };
            let bytes = serde_json::to_vec(&value).context("[io::export] Failed to serialize GeoJSON")?;
            outputs.push((Path::new(MAP_DIR).join(format!("{}.geojson", kind.key())), bytes));
        }
    }

    Ok(outputs)
}

/// Write every output of a run under `dir`. Returns the written paths.
///
/// All targets are opened before any is renamed into place, so a refusal
/// to overwrite leaves the existing output set untouched.
pub fn write_outputs(report: &RunReport, config: &Config, dir: &Path, force: bool) -> Result<Vec<PathBuf>> {
    let outputs = render(report, config)?;

    let mut pending = Vec::with_capacity(outputs.len());
    for (name, bytes) in &outputs {
        let path = dir.join(name);
        let mut write = open_for_write(&path, force)?;
        write.write_all(bytes)
            .with_context(|| format!("[io::export] Failed to write {}", path.display()))?;
        pending.push(write);
    }

    let mut written = Vec::with_capacity(pending.len());
    for write in pending {
        let path = write.target().to_path_buf();
        write.finish()?;
        tracing::info!(path = %path.display(), "wrote output");
        written.push(path);
    }
    Ok(written)
}
