use serde::Serialize;

use crate::layer::Theme;
use super::{FinalRow, FinalTable, COLUMNS};

/// Descriptive statistics of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub column: &'static str,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; NaN with fewer than two rows.
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

/// One row of the table head.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub department: String,
    pub values: Vec<(&'static str, f64)>,
}

/// A compact view of the final table for narrative generation: the first
/// rows plus per-column statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSummary {
    pub rows: usize,
    pub head: Vec<SummaryRow>,
    pub columns: Vec<ColumnStats>,
}

/// Quantile of sorted values with linear interpolation between ranks.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() { return f64::NAN }
    let pos = q * (sorted.len() - 1) as f64;
    let (lo, hi) = (pos.floor() as usize, pos.ceil() as usize);
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

fn describe(column: &'static str, values: &[f64]) -> ColumnStats {
    let count = values.len();
    let mean = if count == 0 { f64::NAN } else { values.iter().sum::<f64>() / count as f64 };
    let std = if count < 2 { f64::NAN } else {
        (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64).sqrt()
    };

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    ColumnStats {
        column,
        count,
        mean,
        std,
        min: sorted.first().copied().unwrap_or(f64::NAN),
        p25: quantile(&sorted, 0.25),
        p50: quantile(&sorted, 0.50),
        p75: quantile(&sorted, 0.75),
        max: sorted.last().copied().unwrap_or(f64::NAN),
    }
}

impl FinalTable {
    /// Summarize the table: the first `head` rows in export order (by
    /// descending resguardo area) and descriptive statistics for all 15 columns.
    pub fn summary(&self, head: usize) -> TableSummary {
        let mut ordered = self.iter().collect::<Vec<_>>();
        let res = |row: &FinalRow| row.areas_km2[Theme::Resguardo];
        ordered.sort_by(|a, b| res(b.1).total_cmp(&res(a.1)));

        let head = ordered.iter()
            .take(head)
            .map(|(name, row)| SummaryRow {
                department: name.to_string(),
                values: COLUMNS.into_iter().zip(row.values()).collect(),
            })
            .collect();

        let columns = COLUMNS.iter().enumerate()
            .map(|(i, &column)| {
                let values = self.iter().map(|(_, row)| row.values()[i]).collect::<Vec<_>>();
                describe(column, &values)
            })
            .collect();

        TableSummary { rows: self.len(), head, columns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantiles_interpolate_linearly() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.0), 1.0);
        assert_eq!(quantile(&sorted, 0.5), 2.5);
        assert_eq!(quantile(&sorted, 0.25), 1.75);
        assert_eq!(quantile(&sorted, 1.0), 4.0);
        assert!(quantile(&[], 0.5).is_nan());
    }

    #[test]
    fn describe_matches_sample_statistics() {
        let stats = describe("x", &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(stats.count, 8);
        assert_eq!(stats.mean, 5.0);
        assert!((stats.std - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.p50, 4.5);
        assert_eq!(stats.max, 9.0);
    }

    #[test]
    fn single_value_has_undefined_spread() {
        let stats = describe("x", &[3.0]);
        assert_eq!(stats.mean, 3.0);
        assert!(stats.std.is_nan());
        assert_eq!(stats.p25, 3.0);
    }

    #[test]
    fn empty_table_summary() {
        let summary = FinalTable::default().summary(10);
        assert_eq!(summary.rows, 0);
        assert!(summary.head.is_empty());
        assert_eq!(summary.columns.len(), 15);
        assert!(summary.columns.iter().all(|c| c.count == 0 && c.mean.is_nan()));
    }
}
