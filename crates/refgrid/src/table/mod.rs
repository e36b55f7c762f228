//! Extraction table model and column statistics.

mod model;
mod stats;

pub use model::{RecordTables, Row, Table, TableFingerprint, Validation};
pub use stats::{column_unique_counts, ColumnUniqueCounts, StatsCache};
