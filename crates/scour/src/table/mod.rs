//! In-memory table model and table-source helpers.

mod parser;
mod sample;
mod table;
mod value;

pub use parser::{is_null_value, parse_cell};
pub use sample::sample_table;
pub use table::Table;
pub use value::Value;
