//! Table-level profiling.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::table::Table;

use super::column::{ColumnProfile, ColumnProfiler, DtypeCategory};

/// Profile of an entire table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableProfile {
    pub rows: usize,
    pub columns: usize,
    /// Total missing cells across all columns.
    pub missing_values: usize,
    /// `missing_values / (rows * columns)` (0 for a degenerate table).
    pub missing_rate: f64,
    /// Column-name partitions in table column order. Boolean columns are
    /// folded into `categorical_columns` while each still reports its own
    /// `dtype_category`.
    pub numeric_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
    pub datetime_columns: Vec<String>,
    /// Per-column profiles in table column order.
    pub column_profiles: IndexMap<String, ColumnProfile>,
}

/// Aggregates column profiles across a table.
#[derive(Debug, Clone, Default)]
pub struct TableProfiler {
    column: ColumnProfiler,
}

impl TableProfiler {
    /// Create a table profiler with default column settings.
    pub fn new() -> Self {
        Self {
            column: ColumnProfiler::new(),
        }
    }

    /// Create a table profiler with a custom column profiler.
    pub fn with_column_profiler(column: ColumnProfiler) -> Self {
        Self { column }
    }

    /// Profile a table. A zero-row or zero-column table produces a
    /// well-defined degenerate profile, not an error.
    pub fn profile(&self, table: &Table) -> TableProfile {
        let rows = table.row_count();
        let columns = table.column_count();

        let mut numeric_columns = Vec::new();
        let mut categorical_columns = Vec::new();
        let mut datetime_columns = Vec::new();
        let mut column_profiles = IndexMap::with_capacity(columns);
        let mut missing_values = 0;

        for (name, values) in table.columns() {
            let profile = self.column.profile(values);
            missing_values += profile.missing;
            match profile.dtype_category {
                DtypeCategory::Numeric => numeric_columns.push(name.to_string()),
                DtypeCategory::Datetime => datetime_columns.push(name.to_string()),
                DtypeCategory::Categorical | DtypeCategory::Boolean => {
                    categorical_columns.push(name.to_string())
                }
            }
            column_profiles.insert(name.to_string(), profile);
        }

        let cells = rows * columns;
        let missing_rate = if cells == 0 {
            0.0
        } else {
            missing_values as f64 / cells as f64
        };

        TableProfile {
            rows,
            columns,
            missing_values,
            missing_rate,
            numeric_columns,
            categorical_columns,
            datetime_columns,
            column_profiles,
        }
    }
}
