//! Transformation operations that steps apply to a table.
//!
//! Every operation conforms to the fixed step contract: it takes the
//! current table and either produces a new table or fails with a fault
//! the executor captures. Operations never mutate the input.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScourError};
use crate::profile::quantile;
use crate::table::{parse_cell, Table, Value};

fn default_multiplier() -> f64 {
    1.5
}

/// A transformation operation applied by one plan step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepOp {
    /// Drop rows with a missing cell in any of the given columns
    /// (all columns when none are given).
    DropMissingRows {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        columns: Option<Vec<String>>,
    },

    /// Replace missing cells in a column with a computed or constant value.
    FillMissing {
        column: String,
        strategy: FillStrategy,
    },

    /// Remove a column.
    DropColumn { column: String },

    /// Clamp numeric values into the Tukey fences derived from the column.
    ClipOutliers {
        column: String,
        #[serde(default = "default_multiplier")]
        multiplier: f64,
    },

    /// Replace values in a column based on a mapping (stringified match).
    MapValues {
        column: String,
        mapping: HashMap<String, String>,
    },

    /// Convert the listed values to the missing marker.
    ConvertNa { column: String, values: Vec<String> },

    /// Coerce a column to a target type; non-convertible cells become missing.
    Coerce {
        column: String,
        target: CoerceTarget,
    },

    /// Scale a numeric column.
    Scale {
        column: String,
        method: ScaleMethod,
    },

    /// Rename a column, keeping its position.
    RenameColumn { from: String, to: String },
}

/// How `FillMissing` computes the replacement value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FillStrategy {
    /// Mean of the non-missing numeric values.
    Mean,
    /// Median of the non-missing numeric values.
    Median,
    /// Most frequent non-missing value.
    Mode,
    /// A fixed value, typed like a CSV cell.
    Constant { value: String },
}

/// Target type for `Coerce`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoerceTarget {
    Number,
    Text,
    Bool,
}

/// Scaling method for `Scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMethod {
    /// `(x - mean) / std` with the sample standard deviation.
    ZScore,
    /// `(x - min) / (max - min)`.
    MinMax,
}

impl StepOp {
    /// Apply the operation, producing a new table.
    pub fn apply(&self, table: &Table) -> Result<Table> {
        match self {
            StepOp::DropMissingRows { columns } => drop_missing_rows(table, columns.as_deref()),
            StepOp::FillMissing { column, strategy } => fill_missing(table, column, strategy),
            StepOp::DropColumn { column } => {
                let mut next = table.clone();
                next.drop_column(column)?;
                Ok(next)
            }
            StepOp::ClipOutliers { column, multiplier } => {
                clip_outliers(table, column, *multiplier)
            }
            StepOp::MapValues { column, mapping } => map_values(table, column, mapping),
            StepOp::ConvertNa { column, values } => convert_na(table, column, values),
            StepOp::Coerce { column, target } => coerce(table, column, *target),
            StepOp::Scale { column, method } => scale(table, column, *method),
            StepOp::RenameColumn { from, to } => {
                let mut next = table.clone();
                next.rename_column(from, to)?;
                Ok(next)
            }
        }
    }

    /// Get a human-readable description of the operation.
    pub fn describe(&self) -> String {
        match self {
            StepOp::DropMissingRows { columns: None } => {
                "Drop rows with any missing value".to_string()
            }
            StepOp::DropMissingRows {
                columns: Some(cols),
            } => format!("Drop rows missing a value in {:?}", cols),
            StepOp::FillMissing { column, strategy } => {
                let how = match strategy {
                    FillStrategy::Mean => "mean".to_string(),
                    FillStrategy::Median => "median".to_string(),
                    FillStrategy::Mode => "mode".to_string(),
                    FillStrategy::Constant { value } => format!("'{}'", value),
                };
                format!("Fill missing values in '{}' with {}", column, how)
            }
            StepOp::DropColumn { column } => format!("Drop column '{}'", column),
            StepOp::ClipOutliers { column, multiplier } => {
                format!("Clip '{}' to {}x IQR fences", column, multiplier)
            }
            StepOp::MapValues { column, mapping } => {
                format!("Map {} value(s) in '{}'", mapping.len(), column)
            }
            StepOp::ConvertNa { column, values } => {
                format!("Convert {:?} to missing in '{}'", values, column)
            }
            StepOp::Coerce { column, target } => {
                format!("Coerce '{}' to {:?}", column, target)
            }
            StepOp::Scale { column, method } => {
                format!("Scale '{}' with {:?}", column, method)
            }
            StepOp::RenameColumn { from, to } => format!("Rename '{}' to '{}'", from, to),
        }
    }
}

fn column_values<'a>(table: &'a Table, column: &str) -> Result<&'a [Value]> {
    table
        .column(column)
        .ok_or_else(|| ScourError::UnknownColumn(column.to_string()))
}

/// Sorted non-missing numeric values of a column; errors when there are none.
fn sorted_numbers(table: &Table, column: &str, purpose: &str) -> Result<Vec<f64>> {
    let mut numbers: Vec<f64> = column_values(table, column)?
        .iter()
        .filter_map(Value::as_number)
        .collect();
    if numbers.is_empty() {
        return Err(ScourError::InvalidInput(format!(
            "column '{}' has no numeric values to {}",
            column, purpose
        )));
    }
    numbers.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Ok(numbers)
}

fn drop_missing_rows(table: &Table, columns: Option<&[String]>) -> Result<Table> {
    let considered: Vec<&str> = match columns {
        Some(cols) => {
            for col in cols {
                if !table.contains_column(col) {
                    return Err(ScourError::UnknownColumn(col.clone()));
                }
            }
            cols.iter().map(|c| c.as_str()).collect()
        }
        None => table.column_names().collect(),
    };

    let mut keep = vec![true; table.row_count()];
    for name in considered {
        if let Some(values) = table.column(name) {
            for (row, value) in values.iter().enumerate() {
                if value.is_missing() {
                    keep[row] = false;
                }
            }
        }
    }

    let mut next = table.clone();
    next.retain_rows(&keep);
    Ok(next)
}

fn fill_missing(table: &Table, column: &str, strategy: &FillStrategy) -> Result<Table> {
    let values = column_values(table, column)?;

    let fill = match strategy {
        FillStrategy::Mean => {
            let numbers = sorted_numbers(table, column, "aggregate")?;
            Value::Number(numbers.iter().sum::<f64>() / numbers.len() as f64)
        }
        FillStrategy::Median => {
            let numbers = sorted_numbers(table, column, "aggregate")?;
            Value::Number(quantile(&numbers, 0.5))
        }
        FillStrategy::Mode => {
            let mut counts: Vec<(Value, usize)> = Vec::new();
            for value in values.iter().filter(|v| !v.is_missing()) {
                match counts.iter_mut().find(|(seen, _)| seen == value) {
                    Some((_, n)) => *n += 1,
                    None => counts.push((value.clone(), 1)),
                }
            }
            counts
                .into_iter()
                .max_by_key(|(_, n)| *n)
                .map(|(v, _)| v)
                .ok_or_else(|| {
                    ScourError::InvalidInput(format!(
                        "column '{}' has no values to take a mode from",
                        column
                    ))
                })?
        }
        FillStrategy::Constant { value } => parse_cell(value),
    };

    let filled: Vec<Value> = values
        .iter()
        .map(|v| if v.is_missing() { fill.clone() } else { v.clone() })
        .collect();
    let mut next = table.clone();
    next.replace_column(column, filled)?;
    Ok(next)
}

fn clip_outliers(table: &Table, column: &str, multiplier: f64) -> Result<Table> {
    let numbers = sorted_numbers(table, column, "clip")?;
    let q1 = quantile(&numbers, 0.25);
    let q3 = quantile(&numbers, 0.75);
    let iqr = q3 - q1;
    let lower = q1 - multiplier * iqr;
    let upper = q3 + multiplier * iqr;

    let clipped: Vec<Value> = column_values(table, column)?
        .iter()
        .map(|v| match v {
            Value::Number(n) => Value::Number(n.clamp(lower, upper)),
            other => other.clone(),
        })
        .collect();
    let mut next = table.clone();
    next.replace_column(column, clipped)?;
    Ok(next)
}

fn map_values(table: &Table, column: &str, mapping: &HashMap<String, String>) -> Result<Table> {
    let mapped: Vec<Value> = column_values(table, column)?
        .iter()
        .map(|v| {
            if v.is_missing() {
                return v.clone();
            }
            match mapping.get(&v.to_string()) {
                Some(replacement) => parse_cell(replacement),
                None => v.clone(),
            }
        })
        .collect();
    let mut next = table.clone();
    next.replace_column(column, mapped)?;
    Ok(next)
}

fn convert_na(table: &Table, column: &str, na_values: &[String]) -> Result<Table> {
    let converted: Vec<Value> = column_values(table, column)?
        .iter()
        .map(|v| {
            let text = v.to_string();
            if na_values.iter().any(|na| na.eq_ignore_ascii_case(&text)) {
                Value::Missing
            } else {
                v.clone()
            }
        })
        .collect();
    let mut next = table.clone();
    next.replace_column(column, converted)?;
    Ok(next)
}

fn coerce(table: &Table, column: &str, target: CoerceTarget) -> Result<Table> {
    let coerced: Vec<Value> = column_values(table, column)?
        .iter()
        .map(|v| coerce_cell(v, target))
        .collect();
    let mut next = table.clone();
    next.replace_column(column, coerced)?;
    Ok(next)
}

/// Coerce one cell; non-convertible cells become the missing marker.
fn coerce_cell(value: &Value, target: CoerceTarget) -> Value {
    if value.is_missing() {
        return Value::Missing;
    }
    match target {
        CoerceTarget::Number => match value {
            Value::Number(n) => Value::Number(*n),
            Value::Bool(b) => Value::Number(if *b { 1.0 } else { 0.0 }),
            Value::Text(s) => match s.trim().parse::<f64>() {
                Ok(n) => Value::Number(n),
                Err(_) => Value::Missing,
            },
            _ => Value::Missing,
        },
        CoerceTarget::Text => Value::Text(value.to_string()),
        CoerceTarget::Bool => match value {
            Value::Bool(b) => Value::Bool(*b),
            Value::Number(n) if *n == 1.0 => Value::Bool(true),
            Value::Number(n) if *n == 0.0 => Value::Bool(false),
            Value::Text(s) => match s.trim().to_lowercase().as_str() {
                "true" | "yes" | "t" | "y" | "1" => Value::Bool(true),
                "false" | "no" | "f" | "n" | "0" => Value::Bool(false),
                _ => Value::Missing,
            },
            _ => Value::Missing,
        },
    }
}

fn scale(table: &Table, column: &str, method: ScaleMethod) -> Result<Table> {
    let numbers = sorted_numbers(table, column, "scale")?;

    let transform: Box<dyn Fn(f64) -> f64> = match method {
        ScaleMethod::ZScore => {
            let mean = numbers.iter().sum::<f64>() / numbers.len() as f64;
            let std = if numbers.len() < 2 {
                0.0
            } else {
                let sum_sq: f64 = numbers.iter().map(|v| (v - mean) * (v - mean)).sum();
                (sum_sq / (numbers.len() - 1) as f64).sqrt()
            };
            if std == 0.0 {
                return Err(ScourError::InvalidInput(format!(
                    "column '{}' has zero variance",
                    column
                )));
            }
            Box::new(move |x| (x - mean) / std)
        }
        ScaleMethod::MinMax => {
            let min = numbers[0];
            let max = numbers[numbers.len() - 1];
            if max == min {
                return Err(ScourError::InvalidInput(format!(
                    "column '{}' is constant",
                    column
                )));
            }
            Box::new(move |x| (x - min) / (max - min))
        }
    };

    let scaled: Vec<Value> = column_values(table, column)?
        .iter()
        .map(|v| match v {
            Value::Number(n) => Value::Number(transform(*n)),
            other => other.clone(),
        })
        .collect();
    let mut next = table.clone();
    next.replace_column(column, scaled)?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with(column: &str, values: Vec<Value>) -> Table {
        Table::from_columns(vec![(column.to_string(), values)]).unwrap()
    }

    #[test]
    fn test_drop_missing_rows_all_columns() {
        let table = Table::from_columns(vec![
            (
                "a".to_string(),
                vec![1.0.into(), Value::Missing, 3.0.into()],
            ),
            ("b".to_string(), vec!["x".into(), "y".into(), "z".into()]),
        ])
        .unwrap();

        let next = StepOp::DropMissingRows { columns: None }
            .apply(&table)
            .unwrap();
        assert_eq!(next.row_count(), 2);
        assert_eq!(next.get("b", 1), Some(&"z".into()));
        // The input table is untouched.
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn test_drop_missing_rows_named_column_only() {
        let table = Table::from_columns(vec![
            (
                "a".to_string(),
                vec![1.0.into(), Value::Missing, 3.0.into()],
            ),
            (
                "b".to_string(),
                vec![Value::Missing, "y".into(), "z".into()],
            ),
        ])
        .unwrap();

        let next = StepOp::DropMissingRows {
            columns: Some(vec!["b".to_string()]),
        }
        .apply(&table)
        .unwrap();
        // Only the row missing in `b` goes; the row missing in `a` stays.
        assert_eq!(next.row_count(), 2);
        assert_eq!(next.get("a", 0), Some(&Value::Missing));
    }

    #[test]
    fn test_fill_missing_mean() {
        let table = table_with(
            "v",
            vec![1.0.into(), Value::Missing, 3.0.into(), Value::Missing],
        );
        let next = StepOp::FillMissing {
            column: "v".to_string(),
            strategy: FillStrategy::Mean,
        }
        .apply(&table)
        .unwrap();
        assert_eq!(next.get("v", 1), Some(&Value::Number(2.0)));
        assert_eq!(next.missing_count(), 0);
    }

    #[test]
    fn test_fill_missing_median() {
        let table = table_with(
            "v",
            vec![1.0.into(), 2.0.into(), 100.0.into(), Value::Missing],
        );
        let next = StepOp::FillMissing {
            column: "v".to_string(),
            strategy: FillStrategy::Median,
        }
        .apply(&table)
        .unwrap();
        assert_eq!(next.get("v", 3), Some(&Value::Number(2.0)));
    }

    #[test]
    fn test_fill_missing_mode() {
        let table = table_with(
            "v",
            vec!["a".into(), "b".into(), "a".into(), Value::Missing],
        );
        let next = StepOp::FillMissing {
            column: "v".to_string(),
            strategy: FillStrategy::Mode,
        }
        .apply(&table)
        .unwrap();
        assert_eq!(next.get("v", 3), Some(&"a".into()));
    }

    #[test]
    fn test_fill_missing_constant_is_typed() {
        let table = table_with("v", vec![1.0.into(), Value::Missing]);
        let next = StepOp::FillMissing {
            column: "v".to_string(),
            strategy: FillStrategy::Constant {
                value: "0".to_string(),
            },
        }
        .apply(&table)
        .unwrap();
        assert_eq!(next.get("v", 1), Some(&Value::Number(0.0)));
    }

    #[test]
    fn test_fill_mean_fails_without_numbers() {
        let table = table_with("v", vec!["a".into(), Value::Missing]);
        let result = StepOp::FillMissing {
            column: "v".to_string(),
            strategy: FillStrategy::Mean,
        }
        .apply(&table);
        assert!(matches!(result, Err(ScourError::InvalidInput(_))));
    }

    #[test]
    fn test_clip_outliers() {
        let table = table_with(
            "v",
            vec![1.0.into(), 2.0.into(), 3.0.into(), 4.0.into(), 100.0.into()],
        );
        let next = StepOp::ClipOutliers {
            column: "v".to_string(),
            multiplier: 1.5,
        }
        .apply(&table)
        .unwrap();
        // Upper fence: q3 + 1.5*IQR = 4 + 3 = 7.
        assert_eq!(next.get("v", 4), Some(&Value::Number(7.0)));
        assert_eq!(next.get("v", 0), Some(&Value::Number(1.0)));
    }

    #[test]
    fn test_map_values() {
        let mut mapping = HashMap::new();
        mapping.insert("m".to_string(), "male".to_string());
        let table = table_with("sex", vec!["m".into(), "female".into()]);
        let next = StepOp::MapValues {
            column: "sex".to_string(),
            mapping,
        }
        .apply(&table)
        .unwrap();
        assert_eq!(next.get("sex", 0), Some(&"male".into()));
        assert_eq!(next.get("sex", 1), Some(&"female".into()));
    }

    #[test]
    fn test_convert_na_case_insensitive() {
        let table = table_with("v", vec!["Unknown".into(), "x".into()]);
        let next = StepOp::ConvertNa {
            column: "v".to_string(),
            values: vec!["unknown".to_string()],
        }
        .apply(&table)
        .unwrap();
        assert_eq!(next.get("v", 0), Some(&Value::Missing));
        assert_eq!(next.get("v", 1), Some(&"x".into()));
    }

    #[test]
    fn test_coerce_to_number() {
        let table = table_with(
            "v",
            vec!["12".into(), "abc".into(), true.into(), Value::Missing],
        );
        let next = StepOp::Coerce {
            column: "v".to_string(),
            target: CoerceTarget::Number,
        }
        .apply(&table)
        .unwrap();
        assert_eq!(next.get("v", 0), Some(&Value::Number(12.0)));
        assert_eq!(next.get("v", 1), Some(&Value::Missing));
        assert_eq!(next.get("v", 2), Some(&Value::Number(1.0)));
        assert_eq!(next.get("v", 3), Some(&Value::Missing));
    }

    #[test]
    fn test_coerce_to_bool() {
        let table = table_with("v", vec!["yes".into(), 0.0.into(), "maybe".into()]);
        let next = StepOp::Coerce {
            column: "v".to_string(),
            target: CoerceTarget::Bool,
        }
        .apply(&table)
        .unwrap();
        assert_eq!(next.get("v", 0), Some(&Value::Bool(true)));
        assert_eq!(next.get("v", 1), Some(&Value::Bool(false)));
        assert_eq!(next.get("v", 2), Some(&Value::Missing));
    }

    #[test]
    fn test_scale_min_max() {
        let table = table_with("v", vec![0.0.into(), 5.0.into(), 10.0.into()]);
        let next = StepOp::Scale {
            column: "v".to_string(),
            method: ScaleMethod::MinMax,
        }
        .apply(&table)
        .unwrap();
        assert_eq!(next.get("v", 0), Some(&Value::Number(0.0)));
        assert_eq!(next.get("v", 1), Some(&Value::Number(0.5)));
        assert_eq!(next.get("v", 2), Some(&Value::Number(1.0)));
    }

    #[test]
    fn test_scale_z_score_rejects_constant() {
        let table = table_with("v", vec![3.0.into(), 3.0.into()]);
        let result = StepOp::Scale {
            column: "v".to_string(),
            method: ScaleMethod::ZScore,
        }
        .apply(&table);
        assert!(matches!(result, Err(ScourError::InvalidInput(_))));
    }

    #[test]
    fn test_unknown_column_is_a_fault() {
        let table = table_with("v", vec![1.0.into()]);
        let result = StepOp::DropColumn {
            column: "nope".to_string(),
        }
        .apply(&table);
        assert!(matches!(result, Err(ScourError::UnknownColumn(_))));
    }

    #[test]
    fn test_rename_column() {
        let table = table_with("old", vec![1.0.into()]);
        let next = StepOp::RenameColumn {
            from: "old".to_string(),
            to: "new".to_string(),
        }
        .apply(&table)
        .unwrap();
        assert!(next.contains_column("new"));
        assert!(!next.contains_column("old"));
    }
}
