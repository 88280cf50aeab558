//! CSV parsing into typed tables, and writing tables back out.
//!
//! Cell typing happens per cell: null markers become `Missing`, numeric
//! strings become `Number`, `true`/`false` become `Bool`, date-shaped
//! strings become `DateTime`, everything else stays `Text`. A column's
//! dtype category is decided later by the profiler from the cell types.

use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, ScourError};

use super::table::Table;
use super::value::Value;

// Date patterns compiled once on first use.
static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}-\d{2}-\d{2}").unwrap(), // ISO date
        Regex::new(r"^\d{2}/\d{2}/\d{4}").unwrap(), // US date
        Regex::new(r"^\d{2}-\d{2}-\d{4}").unwrap(), // European date
        Regex::new(r"^\d{4}/\d{2}/\d{2}").unwrap(), // Alt ISO
    ]
});

/// Check if a raw string represents a missing/null value.
pub fn is_null_value(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("nil")
        || trimmed == "."
        || trimmed == "-"
}

/// Parse one raw string into a typed cell value.
pub fn parse_cell(raw: &str) -> Value {
    let trimmed = raw.trim();
    if is_null_value(trimmed) {
        return Value::Missing;
    }
    match trimmed.to_lowercase().as_str() {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::Number(i as f64);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return Value::Number(f);
    }
    if looks_like_date(trimmed) {
        if let Some(dt) = parse_datetime(trimmed) {
            return Value::DateTime(dt);
        }
    }
    Value::Text(trimmed.to_string())
}

fn looks_like_date(value: &str) -> bool {
    DATE_PATTERNS.iter().any(|pattern| pattern.is_match(value))
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    for format in ["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

impl Table {
    /// Parse a CSV string (header row required) into a typed table.
    pub fn from_csv_str(data: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().from_reader(data.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if headers.is_empty() {
            return Err(ScourError::EmptyData("no header row".to_string()));
        }

        let mut columns: Vec<Vec<Value>> = vec![Vec::new(); headers.len()];
        for record in reader.records() {
            let record = record?;
            if record.len() != headers.len() {
                return Err(ScourError::InvalidInput(format!(
                    "row has {} fields, expected {}",
                    record.len(),
                    headers.len()
                )));
            }
            for (idx, field) in record.iter().enumerate() {
                columns[idx].push(parse_cell(field));
            }
        }

        Table::from_columns(headers.into_iter().zip(columns))
    }

    /// Read and parse a CSV file.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| ScourError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_csv_str(&data)
    }

    /// Serialize the table back to CSV. Missing cells become empty fields.
    pub fn to_csv_string(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(self.column_names())?;
        for row in 0..self.row_count() {
            let record: Vec<String> = self
                .columns()
                .map(|(_, values)| values[row].to_string())
                .collect();
            writer.write_record(&record)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| ScourError::InvalidInput(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| ScourError::InvalidInput(e.to_string()))
    }
}
