use std::{collections::BTreeMap, sync::Arc};

use crate::{layer::{PerTheme, Theme}, overlay::DepartmentTotals};

/// Per-department totals for each thematic layer. A layer with no fragments
/// in the department has no entry; defaults are filled when composing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RankingRow {
    pub totals: PerTheme<Option<DepartmentTotals>>,
}

impl RankingRow {
    #[inline] pub fn get(&self, theme: Theme) -> Option<DepartmentTotals> { self.totals[theme] }
}

/// Fragment counts and areas per department and thematic layer.
#[derive(Debug, Clone, Default)]
pub struct RankingTable {
    rows: BTreeMap<Arc<str>, RankingRow>,
}

impl RankingTable {
    /// Outer-join the four per-layer aggregations on department name.
    pub fn from_layers(per_layer: PerTheme<BTreeMap<Arc<str>, DepartmentTotals>>) -> Self {
        let mut rows = BTreeMap::<Arc<str>, RankingRow>::new();
        for (theme, totals) in Theme::ALL.into_iter().zip(per_layer.0) {
            for (name, totals) in totals {
                rows.entry(name).or_default().totals[theme] = Some(totals);
            }
        }
        Self { rows }
    }

    #[inline] pub fn len(&self) -> usize { self.rows.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    #[inline] pub fn get(&self, department: &str) -> Option<&RankingRow> { self.rows.get(department) }

    /// Rows in department-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&Arc<str>, &RankingRow)> { self.rows.iter() }
}
