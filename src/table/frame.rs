use anyhow::{Context, Result};
use polars::prelude::*;

use crate::{layer::Theme, overlay::LayerPair};
use super::{FinalTable, OverlapTable};

/// Name of the department key column in exported frames.
pub const DEPARTMENT_COLUMN: &str = "department";

impl FinalTable {
    /// Convert to a DataFrame: the department key, four integer count
    /// columns and eleven area columns.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut columns = vec![Column::new(
            DEPARTMENT_COLUMN.into(),
            self.iter().map(|(name, _)| name.to_string()).collect::<Vec<_>>(),
        )];

        for theme in Theme::ALL {
            columns.push(Column::new(
                theme.count_column().into(),
                self.iter().map(|(_, row)| row.counts[theme]).collect::<Vec<u32>>(),
            ));
        }
        for theme in Theme::ALL {
            columns.push(Column::new(
                theme.area_column().into(),
                self.iter().map(|(_, row)| row.areas_km2[theme]).collect::<Vec<f64>>(),
            ));
        }
        for pair in LayerPair::ALL {
            columns.push(Column::new(
                pair.column().into(),
                self.iter().map(|(_, row)| row.overlaps_km2[pair]).collect::<Vec<f64>>(),
            ));
        }
        columns.push(Column::new(
            "area_total_super_km2".into(),
            self.iter().map(|(_, row)| row.total_overlap_km2).collect::<Vec<f64>>(),
        ));

        DataFrame::new(columns).context("[table::frame] Failed to build final table frame")
    }
}

impl OverlapTable {
    /// Convert to a DataFrame with the six pair columns (absent values as
    /// zero) and their total.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut columns = vec![Column::new(
            DEPARTMENT_COLUMN.into(),
            self.iter().map(|(name, _)| name.to_string()).collect::<Vec<_>>(),
        )];

        for pair in LayerPair::ALL {
            columns.push(Column::new(
                pair.column().into(),
                self.iter().map(|(_, row)| row.get(pair).unwrap_or(0.0)).collect::<Vec<f64>>(),
            ));
        }
        columns.push(Column::new(
            "area_total_super_km2".into(),
            self.iter().map(|(_, row)| row.total()).collect::<Vec<f64>>(),
        ));

        DataFrame::new(columns).context("[table::frame] Failed to build overlap table frame")
    }
}

/// Sort a frame by one column, largest first. Presentation only.
pub fn sort_descending(df: &DataFrame, column: &str) -> Result<DataFrame> {
    df.sort([column], SortMultipleOptions::default().with_order_descending(true))
        .with_context(|| format!("[table::frame] Failed to sort by {column:?}"))
}
