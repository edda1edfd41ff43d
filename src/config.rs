use std::{collections::BTreeMap, path::{Path, PathBuf}};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::{geom::Crs, layer::{LayerKind, Theme}};

/// Run configuration, read from a JSON file.
///
/// ```json
/// {
///   "inputs": {
///     "zrc": "data/zrc.shp",
///     "res": "data/resguardos.shp",
///     "cc": "data/consejos.shp",
///     "cfa": "data/pdet.shp",
///     "departments": "data/departamentos.shp",
///     "crs": { "cfa": "EPSG:4686" }
///   },
///   "analysis": { "department_field": "dpto_cnmbr", "planar_crs": "EPSG:3116" },
///   "output": { "dir": "salida", "summary_rows": 10 }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub inputs: InputPaths,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Shapefile locations for the five layers, keyed like `LayerKind::key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputPaths {
    pub zrc: PathBuf,
    pub res: PathBuf,
    pub cc: PathBuf,
    pub cfa: PathBuf,
    pub departments: PathBuf,
    /// Reference systems that take precedence over the `.prj` sidecar.
    #[serde(default)]
    pub crs: BTreeMap<String, Crs>,
}

impl InputPaths {
    pub fn path(&self, kind: LayerKind) -> &Path {
        match kind {
            LayerKind::Thematic(Theme::Zrc) => &self.zrc,
            LayerKind::Thematic(Theme::Resguardo) => &self.res,
            LayerKind::Thematic(Theme::ConsejoComunitario) => &self.cc,
            LayerKind::Thematic(Theme::ConflictZone) => &self.cfa,
            LayerKind::Departments => &self.departments,
        }
    }

    #[inline] pub fn crs_override(&self, kind: LayerKind) -> Option<&Crs> { self.crs.get(kind.key()) }

    fn paths_mut(&mut self) -> [&mut PathBuf; 5] {
        [&mut self.zrc, &mut self.res, &mut self.cc, &mut self.cfa, &mut self.departments]
    }
}

/// Parameters of the computation itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Attribute holding the department name in the department layer.
    pub department_field: String,
    /// Equal-area-enough projected system used for every measurement.
    pub planar_crs: Crs,
    /// Lon/lat system used for map output.
    pub geographic_crs: Crs,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            department_field: "dpto_cnmbr".to_string(),
            planar_crs: Crs::magna_bogota(),
            geographic_crs: Crs::wgs84(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub dir: PathBuf,
    /// Rows in the head of the narrative summary.
    pub summary_rows: usize,
    /// Write per-layer GeoJSON for the map renderer.
    pub geojson: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: PathBuf::from("salida"), summary_rows: 10, geojson: true }
    }
}

impl Config {
    /// Parse and validate a config from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("[config] Invalid config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file. Relative paths inside it are resolved against the
    /// file's own directory.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("[config] Failed to read {}", path.display()))?;
        let mut config = Self::from_json(&text)
            .with_context(|| format!("[config] Failed to load {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.resolve_relative(base);
        }
        Ok(config)
    }

    fn resolve_relative(&mut self, base: &Path) {
        let join = |path: &mut PathBuf| if path.is_relative() { *path = base.join(&*path) };
        self.inputs.paths_mut().into_iter().for_each(join);
        join(&mut self.output.dir);
    }

    pub fn validate(&self) -> Result<()> {
        let analysis = &self.analysis;
        ensure!(!analysis.department_field.trim().is_empty(), "[config] department_field must not be empty");
        ensure!(!analysis.planar_crs.is_geographic(),
            "[config] planar_crs must be a projected system, got {}", analysis.planar_crs);
        ensure!(analysis.geographic_crs.is_geographic(),
            "[config] geographic_crs must be a lon/lat system, got {}", analysis.geographic_crs);

        for key in self.inputs.crs.keys() {
            ensure!(LayerKind::from_key(key).is_some(), "[config] Unknown layer {key:?} in inputs.crs");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "inputs": {
            "zrc": "zrc.shp", "res": "res.shp", "cc": "cc.shp", "cfa": "cfa.shp",
            "departments": "/data/dptos.shp"
        }
    }"#;

    #[test]
    fn defaults_fill_in_missing_sections() {
        let config = Config::from_json(MINIMAL).unwrap();
        assert_eq!(config.analysis.department_field, "dpto_cnmbr");
        assert_eq!(config.analysis.planar_crs, Crs::magna_bogota());
        assert_eq!(config.analysis.geographic_crs, Crs::wgs84());
        assert_eq!(config.output.summary_rows, 10);
        assert!(config.output.geojson);
        assert_eq!(config.inputs.path(LayerKind::Thematic(Theme::ConflictZone)), Path::new("cfa.shp"));
    }

    #[test]
    fn crs_overrides_are_keyed_by_layer() {
        let text = MINIMAL.replace(r#""departments""#, r#""crs": { "cfa": "EPSG:4686" }, "departments""#);
        let config = Config::from_json(&text).unwrap();
        let crs = config.inputs.crs_override(LayerKind::Thematic(Theme::ConflictZone)).unwrap();
        assert_eq!(crs.epsg(), Some(4686));
        assert!(config.inputs.crs_override(LayerKind::Departments).is_none());
    }

    #[test]
    fn rejects_bad_values() {
        let geographic_planar = MINIMAL.replace("}\n    }", r#"}, "analysis": { "planar_crs": "EPSG:4326" } }"#);
        assert!(Config::from_json(&geographic_planar).is_err());

        let unknown_layer = MINIMAL.replace(r#""departments""#, r#""crs": { "roads": "EPSG:4326" }, "departments""#);
        assert!(Config::from_json(&unknown_layer).is_err());

        let unknown_field = MINIMAL.replace(r#""zrc": "zrc.shp""#, r#""zrc": "zrc.shp", "extra": 1"#);
        assert!(Config::from_json(&unknown_field).is_err());
    }

    #[test]
    fn relative_paths_resolve_against_the_config_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, MINIMAL).unwrap();

        let config = Config::from_path(&path).unwrap();
        assert_eq!(config.inputs.zrc, dir.path().join("zrc.shp"));
        assert_eq!(config.inputs.departments, PathBuf::from("/data/dptos.shp"));
        assert_eq!(config.output.dir, dir.path().join("salida"));
    }
}
