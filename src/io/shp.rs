use std::{collections::BTreeMap, path::{Path, PathBuf}};

use anyhow::{bail, Context, Result};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use shapefile::{dbase::{FieldValue, Record}, PolygonRing, Reader, Shape};

use crate::{
    config::InputPaths,
    geom::Crs,
    layer::{AttrValue, Attributes, Feature, Layer, LayerKind},
    source::LayerSource,
};
use super::prj::read_prj;

/// Group shapefile rings into polygons: each outer ring owns the inner
/// rings that follow it.
fn rings_to_multipolygon<P>(rings: &[PolygonRing<P>], xy: impl Fn(&P) -> Coord<f64>) -> MultiPolygon<f64> {
    let to_line = |points: &[P]| {
        let mut coords = points.iter().map(&xy).collect::<Vec<_>>();
        if coords.first() != coords.last() {
            if let Some(&first) = coords.first() { coords.push(first) }
        }
        LineString::from(coords)
    };

    let mut polygons = Vec::new();
    let mut exterior: Option<LineString<f64>> = None;
    let mut holes = Vec::new();

    for ring in rings {
        match ring {
            PolygonRing::Outer(points) => {
                if let Some(ext) = exterior.replace(to_line(points)) {
                    polygons.push(Polygon::new(ext, std::mem::take(&mut holes)));
                }
            }
            // A hole before any outer ring has nothing to belong to.
            PolygonRing::Inner(points) if exterior.is_some() => holes.push(to_line(points)),
            PolygonRing::Inner(_) => {}
        }
    }
    if let Some(ext) = exterior {
        polygons.push(Polygon::new(ext, holes));
    }

    MultiPolygon::new(polygons)
}

/// Convert a shapefile shape to a multipolygon. Null shapes become empty
/// geometries; non-polygon shapes are an error.
pub fn shape_to_multipolygon(shape: &Shape) -> Result<MultiPolygon<f64>> {
    Ok(match shape {
        Shape::NullShape => MultiPolygon::new(vec![]),
        Shape::Polygon(p) => rings_to_multipolygon(p.rings(), |pt| Coord { x: pt.x, y: pt.y }),
        Shape::PolygonM(p) => rings_to_multipolygon(p.rings(), |pt| Coord { x: pt.x, y: pt.y }),
        Shape::PolygonZ(p) => rings_to_multipolygon(p.rings(), |pt| Coord { x: pt.x, y: pt.y }),
        other => bail!("expected polygon shapes, found {:?}", other.shapetype()),
    })
}

/// Map one dBase value to an attribute value.
fn field_to_attr(value: FieldValue) -> AttrValue {
    match value {
        FieldValue::Character(Some(s)) | FieldValue::Memo(s) => AttrValue::Text(s.trim().to_string()),
        FieldValue::Numeric(Some(n)) | FieldValue::Double(n) | FieldValue::Currency(n) => AttrValue::Number(n),
        FieldValue::Float(Some(n)) => AttrValue::Number(n as f64),
        FieldValue::Integer(n) => AttrValue::Number(n as f64),
        FieldValue::Logical(Some(b)) => AttrValue::Bool(b),
        FieldValue::Date(Some(d)) => AttrValue::date(d.year(), d.month(), d.day()),
        FieldValue::DateTime(dt) => {
            let d = dt.date();
            AttrValue::date(d.year(), d.month(), d.day())
        }
        _ => AttrValue::Null,
    }
}

fn record_to_attributes(record: Record) -> Attributes {
    record.into_iter().map(|(name, value)| (name, field_to_attr(value))).collect()
}

/// Read every shape and record of a shapefile.
fn read_shapes_and_records(path: &Path) -> Result<Vec<(Shape, Record)>> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("[io::shp] Failed to open shapefile: {}", path.display()))?;

    let mut items = Vec::with_capacity(reader.shape_count()?);
    for result in reader.iter_shapes_and_records() {
        let (shape, record) = result.context("[io::shp] Error reading shape+record")?;
        items.push((shape, record));
    }
    Ok(items)
}

/// Read one shapefile into a layer. `crs_override` takes precedence over the
/// `.prj` sidecar.
pub fn read_layer(kind: LayerKind, path: &Path, crs_override: Option<&Crs>) -> Result<Layer> {
    let crs = match crs_override {
        Some(crs) => Some(crs.clone()),
        None => read_prj(path)?,
    };

    let features = read_shapes_and_records(path)?
        .into_iter()
        .enumerate()
        .map(|(idx, (shape, record))| {
            let geometry = shape_to_multipolygon(&shape)
                .with_context(|| format!("[io::shp] Feature {idx} of {}", path.display()))?;
            Ok(Feature::new(kind, geometry, record_to_attributes(record)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Layer::new(kind, crs, features))
}

/// Loads the five layers from shapefiles named in the config.
#[derive(Debug, Clone)]
pub struct ShapefileSource {
    inputs: InputPaths,
}

impl ShapefileSource {
    pub fn new(inputs: InputPaths) -> Self { Self { inputs } }
}

impl LayerSource for ShapefileSource {
    fn load(&self, kind: LayerKind) -> Result<Option<Layer>> {
        let path = self.inputs.path(kind);
        if !path.exists() {
            tracing::error!(layer = %kind, path = %path.display(), "layer file not found");
            return Ok(None)
        }
        read_layer(kind, path, self.inputs.crs_override(kind)).map(Some)
    }
}

/// What `inspect` reports about one shapefile.
#[derive(Debug, Clone)]
pub struct ShapefileInfo {
    pub path: PathBuf,
    pub features: usize,
    pub crs: Option<Crs>,
    /// Shape type name → count.
    pub shape_types: BTreeMap<String, usize>,
    /// Attribute columns of the first record, with their dBase value kind.
    pub fields: Vec<(String, &'static str)>,
}

fn field_kind(value: &FieldValue) -> &'static str {
    match value {
        FieldValue::Character(_) | FieldValue::Memo(_) => "text",
        FieldValue::Numeric(_) | FieldValue::Float(_) | FieldValue::Integer(_)
            | FieldValue::Double(_) | FieldValue::Currency(_) => "number",
        FieldValue::Logical(_) => "bool",
        FieldValue::Date(_) | FieldValue::DateTime(_) => "date",
        _ => "other",
    }
}

/// Summarize a shapefile without converting its geometries.
pub fn inspect(path: &Path) -> Result<ShapefileInfo> {
    let items = read_shapes_and_records(path)?;

    let mut shape_types = BTreeMap::new();
    for (shape, _) in &items {
        *shape_types.entry(format!("{:?}", shape.shapetype())).or_default() += 1;
    }

    let fields = items.first()
        .map(|(_, record)| {
            record.clone().into_iter()
                .map(|(name, value)| {
                    let kind = field_kind(&value);
                    (name, kind)
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(ShapefileInfo {
        path: path.to_path_buf(),
        features: items.len(),
        crs: read_prj(path)?,
        shape_types,
        fields,
    })
}

#[cfg(test)]
mod tests {
    use shapefile::Point;

    use super::*;

    fn ring(points: &[(f64, f64)]) -> Vec<Point> {
        points.iter().map(|&(x, y)| Point { x, y }).collect()
    }

    #[test]
    fn outer_rings_own_the_holes_that_follow() {
        let rings = vec![
            PolygonRing::Outer(ring(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)])),
            PolygonRing::Inner(ring(&[(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0), (2.0, 2.0)])),
            PolygonRing::Outer(ring(&[(20.0, 0.0), (20.0, 1.0), (21.0, 1.0), (21.0, 0.0)])),
        ];
        let mp = rings_to_multipolygon(&rings, |pt| Coord { x: pt.x, y: pt.y });

        assert_eq!(mp.0.len(), 2);
        assert_eq!(mp.0[0].interiors().len(), 1);
        assert!(mp.0[1].interiors().is_empty());
        // Open rings are closed.
        let exterior = mp.0[1].exterior();
        assert_eq!(exterior.0.first(), exterior.0.last());
    }

    #[test]
    fn dbase_values_map_to_attributes() {
        assert_eq!(field_to_attr(FieldValue::Character(Some(" META ".into()))), AttrValue::from("META"));
        assert_eq!(field_to_attr(FieldValue::Character(None)), AttrValue::Null);
        assert_eq!(field_to_attr(FieldValue::Numeric(Some(2.5))), AttrValue::Number(2.5));
        assert_eq!(field_to_attr(FieldValue::Integer(3)), AttrValue::Number(3.0));
        assert_eq!(field_to_attr(FieldValue::Logical(Some(true))), AttrValue::Bool(true));
        assert_eq!(field_to_attr(FieldValue::Date(None)), AttrValue::Null);
    }

    #[test]
    fn missing_file_is_reported_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nothing.shp");
        let inputs = InputPaths {
            zrc: missing.clone(),
            res: missing.clone(),
            cc: missing.clone(),
            cfa: missing.clone(),
            departments: missing,
            crs: BTreeMap::new(),
        };
        let source = ShapefileSource::new(inputs);
        assert!(source.load(LayerKind::Departments).unwrap().is_none());
    }
}
