//! Scour: profiling and plan-execution engine for tabular data cleaning.
//!
//! Scour characterizes a table column-by-column, flags data-quality
//! issues, and runs an ordered plan of transformation steps against the
//! table while recording a full audit trail.
//!
//! # Core Principles
//!
//! - **Deterministic**: profiling and issue detection are pure functions
//!   of their input
//! - **Fault-absorbing**: a failing step terminates the run, never the
//!   process; the record captures the failure point
//! - **Full provenance**: every run keeps before/after summaries and
//!   per-step timing
//!
//! # Example
//!
//! ```no_run
//! use scour::{Plan, PlanRunner, QualityDetector, Table, TableProfiler};
//!
//! let table = Table::from_csv_path("data.csv").unwrap();
//! let profile = TableProfiler::new().profile(&table);
//! let issues = QualityDetector::new().detect(&profile);
//! println!("{} rows, {} issues", profile.rows, issues.len());
//!
//! let plan: Plan = serde_json::from_str(r#"{"name":"clean","steps":[]}"#).unwrap();
//! let outcome = PlanRunner::new().run(&plan, Some(table));
//! println!("{}", outcome.record.status.label());
//! ```

pub mod error;
pub mod execute;
pub mod plan;
pub mod profile;
pub mod quality;
pub mod table;

pub use error::{Result, ScourError};
pub use execute::{
    ExecutionRecord, PlanRunner, RunOutcome, RunStatus, StepExecutor, StepLog, StepStatus,
    TableSummary,
};
pub use plan::{CoerceTarget, FillStrategy, Plan, ScaleMethod, Step, StepOp};
pub use profile::{ColumnProfile, ColumnProfiler, DtypeCategory, NumericProfile, TableProfile, TableProfiler};
pub use quality::{IssueType, QualityDetector, QualityIssue, Severity};
pub use table::{sample_table, Table, Value};
