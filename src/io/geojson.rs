//! GeoJSON hand-off for the map renderer.

use anyhow::{Context, Result};
use geo::MultiPolygon;
use serde_json::{json, Map, Value};

use crate::{
    geom::{Crs, Projector},
    pipeline::PreparedLayer,
    table::{FinalTable, COLUMNS},
};

/// GeoJSON coordinates of a multipolygon: polygons of rings of [x, y].
fn multipolygon_coords(mp: &MultiPolygon<f64>) -> Value {
    let ring = |ls: &geo::LineString<f64>| ls.coords().map(|c| json!([c.x, c.y])).collect::<Vec<_>>();
    Value::Array(
        mp.0.iter()
            .map(|polygon| {
                let mut rings = vec![ring(polygon.exterior())];
                rings.extend(polygon.interiors().iter().map(ring));
                json!(rings)
            })
            .collect()
    )
}

fn feature(geometry: &MultiPolygon<f64>, properties: Map<String, Value>) -> Value {
    json!({
        "type": "Feature",
        "geometry": { "type": "MultiPolygon", "coordinates": multipolygon_coords(geometry) },
        "properties": properties,
    })
}

fn collection(features: Vec<Value>) -> Value {
    json!({ "type": "FeatureCollection", "features": features })
}

/// A prepared layer reprojected to `to`, with its attributes and computed
/// `area_km2` as properties.
pub fn layer_to_geojson(layer: &PreparedLayer, to: &Crs) -> Result<Value> {
    let projector = Projector::new(layer.crs(), to)?;

    let features = layer.features().iter()
        .map(|f| {
            let geometry = projector.project(&f.geometry)
                .with_context(|| format!("[io::geojson] Failed to reproject feature {} of {}", f.index, layer.kind()))?;

            let mut properties = f.attributes.iter()
                .map(|(name, value)| Ok((name.clone(), serde_json::to_value(value)?)))
                .collect::<Result<Map<_, _>>>()?;
            properties.insert("area_km2".to_string(), json!(f.area_km2));

            Ok(feature(&geometry, properties))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(collection(features))
}

/// The department layer reprojected to `to`, each feature carrying its name
/// and the 15 table values (0 for departments absent from the table).
pub fn departments_to_geojson(layer: &PreparedLayer, field: &str, table: &FinalTable, to: &Crs) -> Result<Value> {
    let projector = Projector::new(layer.crs(), to)?;

    let features = layer.features().iter()
        .map(|f| {
            let geometry = projector.project(&f.geometry)
                .with_context(|| format!("[io::geojson] Failed to reproject department {}", f.index))?;

            let name = f.attributes.get(field).and_then(|value| value.as_text());
            let row = name.and_then(|name| table.get(name));

            let mut properties = Map::new();
            properties.insert(field.to_string(), json!(name));
            for (column, value) in COLUMNS.iter().zip(row.map(|row| row.values()).unwrap_or([0.0; 15])) {
                properties.insert(column.to_string(), json!(value));
            }
            Ok(feature(&geometry, properties))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(collection(features))
}
