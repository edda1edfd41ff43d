//! Tabular exports via polars writers.

use anyhow::{Context, Result};
use polars::{
    frame::DataFrame,
    io::{json::JsonFormat, SerWriter},
    prelude::{CsvWriter, JsonWriter},
};

/// Write a DataFrame to CSV bytes, header included.
pub fn write_csv_bytes(df: &DataFrame) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    CsvWriter::new(&mut out)
        .include_header(true)
        .finish(&mut df.clone())
        .context("[io::table] Failed to write CSV")?;
    Ok(out)
}

/// Write a DataFrame to a JSON array of records, one object per row.
pub fn write_json_records(df: &DataFrame) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    JsonWriter::new(&mut out)
        .with_json_format(JsonFormat::Json)
        .finish(&mut df.clone())
        .context("[io::table] Failed to write JSON records")?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use polars::prelude::*;

    use super::*;

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new("department".into(), vec!["META", "CAUCA"]),
            Column::new("n_res".into(), vec![1u32, 2]),
            Column::new("area_res_km2".into(), vec![5.0, 9.5]),
        ])
        .unwrap()
    }

    #[test]
    fn csv_has_header_and_rows() {
        let text = String::from_utf8(write_csv_bytes(&frame()).unwrap()).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "department,n_res,area_res_km2");
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("CAUCA,2,9.5"));
    }

    #[test]
    fn json_is_an_array_of_records() {
        let bytes = write_json_records(&frame()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["department"], "META");
        assert_eq!(rows[1]["n_res"], 2);
        assert_eq!(rows[1]["area_res_km2"], 9.5);
    }
}
