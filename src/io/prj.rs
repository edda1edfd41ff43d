//! Reference-system detection from ESRI `.prj` sidecar files.

use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;

use crate::geom::Crs;

const AUTHORITY: &str = r#"(?i)(?:AUTHORITY|ID)\[\s*"EPSG"\s*,\s*"?(\d+)"?\s*\]"#;

const ROOT_NAME: &str = r#"^\s*(?:PROJCS|GEOGCS|PROJCRS|GEOGCRS|GEODCRS)\[\s*"([^"]+)""#;

/// Normalized root names, as written by common desktop GIS tools.
const KNOWN_NAMES: &[(&str, u32)] = &[
    ("magna_sirgas_colombia_bogota_zone", 3116),
    ("magna_sirgas_origen_nacional", 9377),
    ("magna_sirgas_cmt12", 9377),
    ("wgs_1984_utm_zone_18n", 32618),
    ("wgs_84_utm_zone_18n", 32618),
    ("gcs_magna", 4686),
    ("magna_sirgas", 4686),
    ("gcs_wgs_1984", 4326),
    ("wgs_84", 4326),
];

fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}

/// Recognise a WKT definition. The last EPSG authority wins, since the root
/// element's identifier closes the text; otherwise the root name is matched.
pub fn detect_crs(wkt: &str) -> Result<Option<Crs>> {
    let authority = Regex::new(AUTHORITY)?;
    let by_authority = authority.captures_iter(wkt)
        .last()
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .and_then(|code| Crs::from_epsg(code).ok());
    if by_authority.is_some() { return Ok(by_authority) }

    let Some(caps) = Regex::new(ROOT_NAME)?.captures(wkt) else { return Ok(None) };
    let name = normalize(&caps[1]);
    Ok(KNOWN_NAMES.iter()
        .find(|(known, _)| *known == name)
        .and_then(|(_, code)| Crs::from_epsg(*code).ok()))
}

/// Read the `.prj` next to a shapefile. `Ok(None)` if there is no sidecar or
/// its contents are not recognised.
pub fn read_prj(shp_path: &Path) -> Result<Option<Crs>> {
    let prj_path = shp_path.with_extension("prj");
    if !prj_path.exists() { return Ok(None) }

    let wkt = std::fs::read_to_string(&prj_path)
        .with_context(|| format!("[io::prj] Failed to read {}", prj_path.display()))?;
    let crs = detect_crs(&wkt)?;
    if crs.is_none() {
        tracing::warn!(path = %prj_path.display(), "unrecognised reference system in .prj");
    }
    Ok(crs)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOGOTA_ESRI: &str = r#"PROJCS["MAGNA-SIRGAS_Colombia_Bogota_zone",GEOGCS["GCS_MAGNA",DATUM["D_MAGNA",SPHEROID["GRS_1980",6378137.0,298.257222101]],PRIMEM["Greenwich",0.0],UNIT["Degree",0.0174532925199433]],PROJECTION["Transverse_Mercator"],PARAMETER["False_Easting",1000000.0],PARAMETER["False_Northing",1000000.0],PARAMETER["Central_Meridian",-74.07750791666666],PARAMETER["Scale_Factor",1.0],PARAMETER["Latitude_Of_Origin",4.596200416666666],UNIT["Meter",1.0]]"#;

    #[test]
    fn esri_names_are_recognised() {
        assert_eq!(detect_crs(BOGOTA_ESRI).unwrap().and_then(|crs| crs.epsg()), Some(3116));
        let wgs = r#"GEOGCS["GCS_WGS_1984",DATUM["D_WGS_1984",SPHEROID["WGS_1984",6378137.0,298.257223563]],PRIMEM["Greenwich",0.0],UNIT["Degree",0.0174532925199433]]"#;
        assert_eq!(detect_crs(wgs).unwrap().and_then(|crs| crs.epsg()), Some(4326));
    }

    #[test]
    fn root_authority_takes_precedence() {
        let wkt = r#"PROJCS["Some local name",GEOGCS["WGS 84",AUTHORITY["EPSG","4326"]],AUTHORITY["EPSG","32618"]]"#;
        assert_eq!(detect_crs(wkt).unwrap().and_then(|crs| crs.epsg()), Some(32618));
    }

    #[test]
    fn unknown_definitions_are_not_guessed() {
        assert!(detect_crs(r#"PROJCS["Lambert_Custom",GEOGCS["GCS_Unknown"]]"#).unwrap().is_none());
        assert!(detect_crs("").unwrap().is_none());
    }

    #[test]
    fn missing_sidecar_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_prj(&dir.path().join("layer.shp")).unwrap().is_none());

        std::fs::write(dir.path().join("layer.prj"), BOGOTA_ESRI).unwrap();
        let crs = read_prj(&dir.path().join("layer.shp")).unwrap();
        assert_eq!(crs, Some(Crs::magna_bogota()));
    }
}
