mod compose;
mod frame;
mod overlap;
mod ranking;
mod summary;

pub use compose::{compose, FinalRow, FinalTable, COLUMNS};
pub use frame::{sort_descending, DEPARTMENT_COLUMN};
pub use overlap::{OverlapRow, OverlapTable};
pub use ranking::{RankingRow, RankingTable};
pub use summary::{ColumnStats, SummaryRow, TableSummary};
