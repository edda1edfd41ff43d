use std::{collections::BTreeMap, sync::Arc};

use crate::{layer::{PerTheme, Theme}, overlay::{LayerPair, PerPair}};
use super::{OverlapTable, RankingTable};

/// Output column names, in output order.
pub const COLUMNS: [&str; 15] = [
    "n_zrc", "n_res", "n_cc", "n_cfa",
    "area_zrc_km2", "area_res_km2", "area_cc_km2", "area_cfa_km2",
    "area_zrc_res_km2", "area_zrc_cc_km2", "area_zrc_cfa_km2",
    "area_res_cc_km2", "area_res_cfa_km2", "area_cc_cfa_km2",
    "area_total_super_km2",
];

/// Fully populated row of the final table.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FinalRow {
    pub counts: PerTheme<u32>,
    pub areas_km2: PerTheme<f64>,
    pub overlaps_km2: PerPair<f64>,
    pub total_overlap_km2: f64,
}

impl FinalRow {
    /// All 15 values in `COLUMNS` order; counts widened to f64.
    pub fn values(&self) -> [f64; 15] {
        let mut values = [0.0; 15];
        for theme in Theme::ALL {
            values[theme.index()] = self.counts[theme] as f64;
            values[4 + theme.index()] = self.areas_km2[theme];
        }
        for pair in LayerPair::ALL {
            values[8 + pair.index()] = self.overlaps_km2[pair];
        }
        values[14] = self.total_overlap_km2;
        values
    }

    /// Look up one value by column name.
    pub fn get(&self, column: &str) -> Option<f64> {
        COLUMNS.iter().position(|&c| c == column).map(|i| self.values()[i])
    }

    fn is_blank(&self) -> bool {
        self.counts.0.iter().all(|&n| n == 0) && self.areas_km2.0.iter().all(|&a| a == 0.0)
    }
}

/// Ranking and overlap values per department, keyed uniquely by name.
#[derive(Debug, Clone, Default)]
pub struct FinalTable {
    rows: BTreeMap<Arc<str>, FinalRow>,
}

impl FinalTable {
    #[inline] pub fn len(&self) -> usize { self.rows.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    #[inline] pub fn get(&self, department: &str) -> Option<&FinalRow> { self.rows.get(department) }

    /// Rows in department-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&Arc<str>, &FinalRow)> { self.rows.iter() }

    /// Values of one column, in department-name order.
    pub fn column(&self, column: &str) -> Option<Vec<f64>> {
        let i = COLUMNS.iter().position(|&c| c == column)?;
        Some(self.rows.values().map(|row| row.values()[i]).collect())
    }
}

/// Left-join the ranking table with the overlap table.
///
/// The ranking table decides which departments appear. Missing ranking and
/// overlap values are filled with zero here and nowhere else. Departments
/// that only appear in the overlap table are dropped.
pub fn compose(ranking: &RankingTable, overlaps: &OverlapTable) -> FinalTable {
    let mut rows = BTreeMap::new();

    for (name, ranking_row) in ranking.iter() {
        let mut row = FinalRow::default();
        for theme in Theme::ALL {
            let totals = ranking_row.get(theme).unwrap_or_default();
            row.counts[theme] = totals.count;
            row.areas_km2[theme] = totals.area_km2;
        }

        if let Some(overlap_row) = overlaps.get(name) {
            row.overlaps_km2 = PerPair::from_fn(|pair| overlap_row.get(pair).unwrap_or(0.0));
            row.total_overlap_km2 = overlap_row.total();
        }

        if row.is_blank() { continue }
        rows.insert(name.clone(), row);
    }

    let dropped = overlaps.iter().filter(|(name, _)| ranking.get(name).is_none()).count();
    if dropped > 0 {
        tracing::debug!(dropped, "overlap rows without a ranking row were not joined");
    }

    FinalTable { rows }
}
