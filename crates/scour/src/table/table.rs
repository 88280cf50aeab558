//! In-memory table of named, equal-length columns.

use indexmap::IndexMap;

use crate::error::{Result, ScourError};

use super::value::Value;

/// An ordered collection of named columns with identical lengths.
///
/// The constructor enforces the table invariants (equal column lengths,
/// unique column names), so a `Table` obtained from any public API is
/// never ragged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: IndexMap<String, Vec<Value>>,
}

impl Table {
    /// Create an empty table with no columns.
    pub fn new() -> Self {
        Self {
            columns: IndexMap::new(),
        }
    }

    /// Create a table from named columns, validating the invariants.
    pub fn from_columns(
        columns: impl IntoIterator<Item = (String, Vec<Value>)>,
    ) -> Result<Self> {
        let mut table = Self::new();
        for (name, values) in columns {
            table.add_column(name, values)?;
        }
        Ok(table)
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.columns.first().map(|(_, v)| v.len()).unwrap_or(0)
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check whether a column exists.
    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Get a column's values by name.
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(|v| v.as_slice())
    }

    /// Iterate over column names in table order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(|s| s.as_str())
    }

    /// Iterate over `(name, values)` pairs in table order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.columns.iter().map(|(n, v)| (n.as_str(), v.as_slice()))
    }

    /// Get a specific cell value.
    pub fn get(&self, column: &str, row: usize) -> Option<&Value> {
        self.columns.get(column).and_then(|v| v.get(row))
    }

    /// Set a specific cell value.
    pub fn set(&mut self, column: &str, row: usize, value: Value) -> Result<()> {
        let values = self
            .columns
            .get_mut(column)
            .ok_or_else(|| ScourError::UnknownColumn(column.to_string()))?;
        let slot = values.get_mut(row).ok_or_else(|| {
            ScourError::InvalidInput(format!("row {} out of bounds for column '{}'", row, column))
        })?;
        *slot = value;
        Ok(())
    }

    /// Append a column, validating length and name uniqueness.
    pub fn add_column(&mut self, name: String, values: Vec<Value>) -> Result<()> {
        if self.columns.contains_key(&name) {
            return Err(ScourError::InvalidInput(format!(
                "duplicate column name '{}'",
                name
            )));
        }
        if !self.columns.is_empty() && values.len() != self.row_count() {
            return Err(ScourError::InvalidInput(format!(
                "column '{}' has {} values, expected {}",
                name,
                values.len(),
                self.row_count()
            )));
        }
        self.columns.insert(name, values);
        Ok(())
    }

    /// Remove a column, preserving the order of the remaining columns.
    pub fn drop_column(&mut self, name: &str) -> Result<Vec<Value>> {
        self.columns
            .shift_remove(name)
            .ok_or_else(|| ScourError::UnknownColumn(name.to_string()))
    }

    /// Rename a column in place, keeping its position.
    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<()> {
        if !self.columns.contains_key(from) {
            return Err(ScourError::UnknownColumn(from.to_string()));
        }
        if from == to {
            return Ok(());
        }
        if self.columns.contains_key(to) {
            return Err(ScourError::InvalidInput(format!(
                "duplicate column name '{}'",
                to
            )));
        }
        self.columns = self
            .columns
            .drain(..)
            .map(|(name, values)| {
                if name == from {
                    (to.to_string(), values)
                } else {
                    (name, values)
                }
            })
            .collect();
        Ok(())
    }

    /// Replace a column's values wholesale. Length must match.
    pub fn replace_column(&mut self, name: &str, values: Vec<Value>) -> Result<()> {
        if values.len() != self.row_count() {
            return Err(ScourError::InvalidInput(format!(
                "column '{}' has {} values, expected {}",
                name,
                values.len(),
                self.row_count()
            )));
        }
        let slot = self
            .columns
            .get_mut(name)
            .ok_or_else(|| ScourError::UnknownColumn(name.to_string()))?;
        *slot = values;
        Ok(())
    }

    /// Keep only the rows where `keep` is true. `keep` must cover every row.
    pub fn retain_rows(&mut self, keep: &[bool]) {
        for values in self.columns.values_mut() {
            let mut row = 0;
            values.retain(|_| {
                let kept = keep.get(row).copied().unwrap_or(true);
                row += 1;
                kept
            });
        }
    }

    /// Count missing cells across the whole table.
    pub fn missing_count(&self) -> usize {
        self.columns
            .values()
            .map(|v| v.iter().filter(|c| c.is_missing()).count())
            .sum()
    }
}
