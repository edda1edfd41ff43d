use std::{collections::BTreeMap, sync::Arc};

use crate::overlay::{LayerPair, PairOverlap, PerPair};

/// Per-department overlap area for each layer pair. Pairs with no overlap in
/// the department have no entry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverlapRow {
    pub areas: PerPair<Option<f64>>,
}

impl OverlapRow {
    #[inline] pub fn get(&self, pair: LayerPair) -> Option<f64> { self.areas[pair] }

    /// Sum of the six pairwise areas.
    ///
    /// Ground covered by three or more layers is counted once per pair it
    /// belongs to, so this over-counts where layers stack. Kept for
    /// compatibility with the published tables.
    pub fn total(&self) -> f64 {
        self.areas.0.iter().flatten().sum()
    }
}

/// Pairwise overlap areas per department.
#[derive(Debug, Clone, Default)]
pub struct OverlapTable {
    rows: BTreeMap<Arc<str>, OverlapRow>,
}

impl OverlapTable {
    /// Merge the six pair results on department name.
    pub fn from_pairs(pairs: &[PairOverlap]) -> Self {
        let mut rows = BTreeMap::<Arc<str>, OverlapRow>::new();
        for overlap in pairs {
            for (name, &area) in &overlap.by_department {
                rows.entry(name.clone()).or_default().areas[overlap.pair] = Some(area);
            }
        }
        Self { rows }
    }

    #[inline] pub fn len(&self) -> usize { self.rows.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    #[inline] pub fn get(&self, department: &str) -> Option<&OverlapRow> { self.rows.get(department) }

    /// Rows in department-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&Arc<str>, &OverlapRow)> { self.rows.iter() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::Theme;

    fn pair_overlap(a: Theme, b: Theme, entries: &[(&str, f64)]) -> PairOverlap {
        PairOverlap {
            pair: LayerPair::new(a, b).unwrap(),
            pieces: entries.len(),
            by_department: entries.iter().map(|&(name, area)| (Arc::from(name), area)).collect(),
        }
    }

    #[test]
    fn merges_pairs_and_totals_present_values() {
        let table = OverlapTable::from_pairs(&[
            pair_overlap(Theme::Zrc, Theme::Resguardo, &[("META", 2.0)]),
            pair_overlap(Theme::Resguardo, Theme::ConflictZone, &[("META", 3.5), ("CAUCA", 1.0)]),
        ]);
        assert_eq!(table.len(), 2);

        let meta = table.get("META").unwrap();
        assert_eq!(meta.get(LayerPair::new(Theme::Zrc, Theme::Resguardo).unwrap()), Some(2.0));
        assert_eq!(meta.get(LayerPair::new(Theme::Zrc, Theme::ConflictZone).unwrap()), None);
        assert_eq!(meta.total(), 5.5);
        assert_eq!(table.get("CAUCA").unwrap().total(), 1.0);
    }

    #[test]
    fn total_counts_stacked_layers_once_per_pair() {
        // Three layers covering the same 1 km² give three 1 km² pair overlaps.
        let table = OverlapTable::from_pairs(&[
            pair_overlap(Theme::Zrc, Theme::Resguardo, &[("META", 1.0)]),
            pair_overlap(Theme::Zrc, Theme::ConsejoComunitario, &[("META", 1.0)]),
            pair_overlap(Theme::Resguardo, Theme::ConsejoComunitario, &[("META", 1.0)]),
        ]);
        assert_eq!(table.get("META").unwrap().total(), 3.0);
    }
}
