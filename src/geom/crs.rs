use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};

/// PROJ.4 definitions for the reference systems the loader can recognise.
const KNOWN_EPSG: &[(u32, &str)] = &[
    // WGS 84 lon/lat
    (4326, "+proj=longlat +datum=WGS84 +no_defs +type=crs"),
    // MAGNA-SIRGAS lon/lat
    (4686, "+proj=longlat +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +no_defs +type=crs"),
    // MAGNA-SIRGAS / Colombia Bogota zone
    (3116, "+proj=tmerc +lat_0=4.59620041666667 +lon_0=-74.0775079166667 +k=1 +x_0=1000000 +y_0=1000000 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs +type=crs"),
    // MAGNA-SIRGAS / Origen-Nacional
    (9377, "+proj=tmerc +lat_0=4 +lon_0=-73 +k=0.9992 +x_0=5000000 +y_0=2000000 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs +type=crs"),
    // WGS 84 / UTM zone 18N
    (32618, "+proj=utm +zone=18 +datum=WGS84 +units=m +no_defs +type=crs"),
];

/// A coordinate reference system, stored as a PROJ.4 definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Crs {
    epsg: Option<u32>,
    proj4: String,
}

impl Crs {
    /// Look up a reference system by EPSG code.
    pub fn from_epsg(code: u32) -> Result<Self> {
        KNOWN_EPSG.iter()
            .find(|(epsg, _)| *epsg == code)
            .map(|(epsg, proj4)| Self { epsg: Some(*epsg), proj4: proj4.to_string() })
            .ok_or_else(|| anyhow!("unsupported EPSG code: {code}"))
    }

    /// Wrap a raw PROJ.4 definition.
    pub fn from_proj4(definition: &str) -> Result<Self> {
        let definition = definition.trim();
        if !definition.starts_with("+proj=") {
            bail!("not a PROJ.4 definition: {definition:?}");
        }
        Ok(Self { epsg: None, proj4: definition.to_string() })
    }

    /// WGS 84 longitude/latitude (EPSG:4326), the map renderer's reference.
    pub fn wgs84() -> Self { Self::known(4326) }

    /// MAGNA-SIRGAS / Colombia Bogota zone (EPSG:3116), the default planar reference.
    pub fn magna_bogota() -> Self { Self::known(3116) }

    fn known(code: u32) -> Self {
        let proj4 = KNOWN_EPSG.iter()
            .find(|(epsg, _)| *epsg == code)
            .map(|(_, proj4)| *proj4)
            .unwrap_or_default();
        Self { epsg: Some(code), proj4: proj4.to_string() }
    }

    #[inline] pub fn epsg(&self) -> Option<u32> { self.epsg }

    #[inline] pub fn proj4(&self) -> &str { &self.proj4 }

    /// True for lon/lat systems (coordinates in degrees).
    pub fn is_geographic(&self) -> bool {
        self.proj4.split_whitespace()
            .any(|token| token == "+proj=longlat" || token == "+proj=latlong")
    }
}

impl FromStr for Crs {
    type Err = anyhow::Error;

    /// Parse `EPSG:<code>` or a raw PROJ.4 string.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.split_once(':') {
            Some((authority, code)) if authority.eq_ignore_ascii_case("epsg") => {
                let code = code.trim().parse::<u32>()
                    .map_err(|_| anyhow!("invalid EPSG code in {s:?}"))?;
                Self::from_epsg(code)
            }
            _ => Self::from_proj4(s),
        }
    }
}

impl TryFrom<String> for Crs {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> { value.parse() }
}

impl From<Crs> for String {
    fn from(crs: Crs) -> Self { crs.to_string() }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.epsg {
            Some(code) => write!(f, "EPSG:{code}"),
            None => f.write_str(&self.proj4),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_epsg_codes_and_proj_strings() {
        let crs: Crs = "EPSG:3116".parse().unwrap();
        assert_eq!(crs, Crs::magna_bogota());
        assert!(!crs.is_geographic());

        let crs: Crs = "epsg:4326".parse().unwrap();
        assert!(crs.is_geographic());

        let crs: Crs = "+proj=utm +zone=19 +datum=WGS84 +units=m +no_defs".parse().unwrap();
        assert_eq!(crs.epsg(), None);
        assert!(!crs.is_geographic());
    }

    #[test]
    fn rejects_unknown_codes_and_garbage() {
        assert!("EPSG:99999".parse::<Crs>().is_err());
        assert!("EPSG:abc".parse::<Crs>().is_err());
        assert!("not a crs".parse::<Crs>().is_err());
    }

    #[test]
    fn serde_uses_the_display_form() {
        let json = serde_json::to_string(&Crs::magna_bogota()).unwrap();
        assert_eq!(json, "\"EPSG:3116\"");
        let crs: Crs = serde_json::from_str("\"EPSG:9377\"").unwrap();
        assert_eq!(crs.epsg(), Some(9377));
    }
}
