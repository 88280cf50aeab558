//! Statistical profiling of tables and columns.

mod column;
mod table;

pub use column::{ColumnProfile, ColumnProfiler, DtypeCategory, NumericProfile};
pub use table::{TableProfile, TableProfiler};

pub(crate) use column::{dtype_of, quantile};
