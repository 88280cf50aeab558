//! Execution records, step logs, and lightweight table summaries.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::profile::DtypeCategory;
use crate::table::{Table, Value};

/// Status of a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// The run is in progress.
    Running,
    /// Every step succeeded.
    Completed,
    /// A step failed; later steps were not attempted.
    Failed,
}

impl RunStatus {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            RunStatus::Running => "Running",
            RunStatus::Completed => "Completed",
            RunStatus::Failed => "Failed",
        }
    }

    /// Check whether the run has finished.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunStatus::Running)
    }
}

/// Status of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Success,
    Failed,
}

/// Log entry for one executed step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepLog {
    /// The step's `order` value.
    pub order: u32,
    /// The step's name.
    pub name: String,
    pub status: StepStatus,
    /// Wall-clock seconds spent evaluating the step.
    pub execution_time: f64,
    /// Present iff the step failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl StepLog {
    /// Log for a step that completed normally.
    pub fn success(order: u32, name: impl Into<String>, execution_time: f64) -> Self {
        Self {
            order,
            name: name.into(),
            status: StepStatus::Success,
            execution_time,
            error_message: None,
        }
    }

    /// Log for a step that raised a fault.
    pub fn failed(
        order: u32,
        name: impl Into<String>,
        execution_time: f64,
        error: impl Into<String>,
    ) -> Self {
        Self {
            order,
            name: name.into(),
            status: StepStatus::Failed,
            execution_time,
            error_message: Some(error.into()),
        }
    }
}

/// Lightweight per-column information in a table summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub dtype_category: DtypeCategory,
    pub missing: usize,
    pub unique: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Lightweight table summary captured before and after a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSummary {
    pub rows: usize,
    pub columns: usize,
    pub missing_values: usize,
    /// Per-column info in table column order.
    pub column_info: IndexMap<String, ColumnInfo>,
}

impl TableSummary {
    /// Summarize a table: shape, missingness, and per-column basics with
    /// mean/std/min/max for numeric columns.
    pub fn of(table: &Table) -> Self {
        let mut column_info = IndexMap::with_capacity(table.column_count());
        let mut missing_values = 0;

        for (name, values) in table.columns() {
            let missing = values.iter().filter(|v| v.is_missing()).count();
            missing_values += missing;

            let mut seen: Vec<String> = Vec::new();
            for value in values.iter().filter(|v| !v.is_missing()) {
                let key = value.to_string();
                if !seen.contains(&key) {
                    seen.push(key);
                }
            }

            let dtype_category = crate::profile::dtype_of(values);
            let mut info = ColumnInfo {
                dtype_category,
                missing,
                unique: seen.len(),
                mean: None,
                std: None,
                min: None,
                max: None,
            };

            if dtype_category == DtypeCategory::Numeric {
                let numbers: Vec<f64> = values.iter().filter_map(Value::as_number).collect();
                if !numbers.is_empty() {
                    let mean = numbers.iter().sum::<f64>() / numbers.len() as f64;
                    let std = if numbers.len() < 2 {
                        0.0
                    } else {
                        let sum_sq: f64 =
                            numbers.iter().map(|v| (v - mean) * (v - mean)).sum();
                        (sum_sq / (numbers.len() - 1) as f64).sqrt()
                    };
                    info.mean = Some(mean);
                    info.std = Some(std);
                    info.min = numbers.iter().copied().reduce(f64::min);
                    info.max = numbers.iter().copied().reduce(f64::max);
                }
            }

            column_info.insert(name.to_string(), info);
        }

        Self {
            rows: table.row_count(),
            columns: table.column_count(),
            missing_values,
            column_info,
        }
    }
}

/// Full audit record of one plan run.
///
/// Created with status `running`, mutated as steps complete, and finalized
/// when the step loop ends, whether by exhaustion or early termination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    /// Unique identifier for this run.
    pub id: String,
    pub status: RunStatus,
    /// Summary of the input table before any step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_summary: Option<TableSummary>,
    /// Summary of the table as of loop termination; reflects partial
    /// progress when a step failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_summary: Option<TableSummary>,
    /// One log per attempted step, in execution order.
    pub step_logs: Vec<StepLog>,
    /// Total wall-clock seconds for the run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<f64>,
    /// Mirrors the failing step's message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl ExecutionRecord {
    /// Create a record for a run that is starting now.
    pub fn start() -> Self {
        Self {
            id: generate_run_id(),
            status: RunStatus::Running,
            before_summary: None,
            after_summary: None,
            step_logs: Vec::new(),
            execution_time: None,
            error_message: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Finalize the record with a terminal status and the total time.
    pub fn finalize(&mut self, status: RunStatus, execution_time: f64) {
        self.status = status;
        self.execution_time = Some(execution_time);
        self.completed_at = Some(Utc::now());
    }
}

/// Generate a run ID: a millisecond timestamp for uniqueness across
/// processes writing to the same directory, plus a process-local counter
/// to separate runs started within the same millisecond.
fn generate_run_id() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    format!(
        "run_{}_{:03}",
        Utc::now().timestamp_millis(),
        COUNTER.fetch_add(1, Ordering::SeqCst)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::sample_table;

    #[test]
    fn test_record_starts_running() {
        let record = ExecutionRecord::start();
        assert!(record.id.starts_with("run_"));
        assert_eq!(record.status, RunStatus::Running);
        assert!(!record.status.is_terminal());
        assert!(record.step_logs.is_empty());
        assert!(record.completed_at.is_none());
    }

    #[test]
    fn test_run_ids_do_not_collide() {
        let first = ExecutionRecord::start();
        let second = ExecutionRecord::start();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_finalize_sets_terminal_fields() {
        let mut record = ExecutionRecord::start();
        record.finalize(RunStatus::Completed, 0.25);
        assert_eq!(record.status, RunStatus::Completed);
        assert!(record.status.is_terminal());
        assert_eq!(record.execution_time, Some(0.25));
        assert!(record.completed_at.is_some());
    }

    #[test]
    fn test_summary_counts_match_table() {
        let table = sample_table();
        let summary = TableSummary::of(&table);
        assert_eq!(summary.rows, table.row_count());
        assert_eq!(summary.columns, table.column_count());
        assert_eq!(summary.missing_values, table.missing_count());
    }

    #[test]
    fn test_summary_numeric_columns_carry_stats() {
        let table = sample_table();
        let summary = TableSummary::of(&table);
        let age = &summary.column_info["age"];
        assert_eq!(age.dtype_category, DtypeCategory::Numeric);
        assert!(age.mean.is_some());
        assert!(age.std.is_some());
        let category = &summary.column_info["category"];
        assert_eq!(category.dtype_category, DtypeCategory::Categorical);
        assert!(category.mean.is_none());
    }

    #[test]
    fn test_step_log_error_presence() {
        let ok = StepLog::success(1, "fill", 0.01);
        assert!(ok.error_message.is_none());
        let bad = StepLog::failed(2, "drop", 0.02, "Column 'x' not found");
        assert_eq!(bad.status, StepStatus::Failed);
        assert!(bad.error_message.is_some());
    }
}
