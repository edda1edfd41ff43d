use std::time::Instant;

use anyhow::{ensure, Context, Result};

use crate::{
    anomaly::Anomaly,
    config::AnalysisConfig,
    error::LayerError,
    layer::{Layer, LayerKind, PerTheme},
    overlay::{aggregate, clip_to_departments, compute_overlaps},
    source::LayerSource,
    table::{compose, FinalTable, OverlapTable, RankingTable},
};
use super::{departments_from_layer, prepare_layer, PreparedLayer};

/// The five input layers, as loaded.
#[derive(Debug, Clone)]
pub struct LayerSet {
    pub thematic: PerTheme<Layer>,
    pub departments: Layer,
}

impl LayerSet {
    pub fn get(&self, kind: LayerKind) -> &Layer {
        match kind {
            LayerKind::Thematic(theme) => &self.thematic[theme],
            LayerKind::Departments => &self.departments,
        }
    }
}

/// The five layers after repair and projection.
#[derive(Debug, Clone)]
pub struct PreparedLayers {
    pub thematic: PerTheme<PreparedLayer>,
    pub departments: PreparedLayer,
}

impl PreparedLayers {
    pub fn get(&self, kind: LayerKind) -> &PreparedLayer {
        match kind {
            LayerKind::Thematic(theme) => &self.thematic[theme],
            LayerKind::Departments => &self.departments,
        }
    }
}

/// Everything a run produces.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub table: FinalTable,
    pub ranking: RankingTable,
    pub overlaps: OverlapTable,
    pub layers: PreparedLayers,
    /// Recoverable problems, in the order they were found.
    pub anomalies: Vec<Anomaly>,
}

/// Load all five layers. A missing, empty or unreferenced layer is fatal.
pub fn load_layers(source: &dyn LayerSource) -> Result<LayerSet> {
    let load = |kind: LayerKind| -> Result<Layer> {
        let layer = source.load(kind)
            .with_context(|| format!("[pipeline] Failed to load layer {kind}"))?
            .ok_or(LayerError::Missing(kind))?;
        let crs = layer.validate()?;
        tracing::info!(layer = %kind, features = layer.len(), crs = %crs, "loaded layer");
        Ok(layer)
    };

    Ok(LayerSet {
        thematic: PerTheme::try_from_fn(|theme| load(LayerKind::Thematic(theme)))?,
        departments: load(LayerKind::Departments)?,
    })
}

/// Compute the per-department convergence table.
///
/// The result is a pure function of the input layers and config: repeated
/// runs over the same inputs give identical tables.
pub fn run(layers: &LayerSet, config: &AnalysisConfig) -> Result<RunReport> {
    let planar = &config.planar_crs;
    ensure!(!planar.is_geographic(), "[pipeline] Planar CRS {planar} is geographic; areas would be in degrees");

    let start = Instant::now();
    let mut anomalies = Vec::new();

    let thematic = PerTheme::try_from_fn(|theme| {
        let (prepared, found) = prepare_layer(&layers.thematic[theme], planar)?;
        anomalies.extend(found);
        Ok::<_, anyhow::Error>(prepared)
    })?;
    let (department_layer, found) = prepare_layer(&layers.departments, planar)?;
    anomalies.extend(found);

    let (departments, found) = departments_from_layer(&department_layer, &config.department_field)?;
    anomalies.extend(found);

    let per_layer = PerTheme::from_fn(|theme| {
        let label = theme.label();
        let (fragments, found) = clip_to_departments(thematic[theme].features(), &departments, label);
        anomalies.extend(found);
        let (totals, found) = aggregate(&fragments, &departments, label);
        anomalies.extend(found);

        tracing::info!(layer = label, fragments = fragments.len(), departments = totals.len(), "aggregated layer");
        totals
    });
    let ranking = RankingTable::from_layers(per_layer);

    let shapes = thematic.as_ref().map(|layer| layer.shapes());
    let (pairs, found) = compute_overlaps(shapes.as_ref().map(|s| s.as_slice()), &departments);
    anomalies.extend(found);
    let overlaps = OverlapTable::from_pairs(&pairs);
    tracing::info!(pairs = pairs.len(), departments = overlaps.len(), "computed pairwise overlaps");

    let table = compose(&ranking, &overlaps);
    tracing::info!(
        departments = table.len(),
        anomalies = anomalies.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "composed final table"
    );

    Ok(RunReport {
        table,
        ranking,
        overlaps,
        layers: PreparedLayers { thematic, departments: department_layer },
        anomalies,
    })
}

/// Load from `source`, then run.
pub fn run_with_source(source: &dyn LayerSource, config: &AnalysisConfig) -> Result<RunReport> {
    run(&load_layers(source)?, config)
}
