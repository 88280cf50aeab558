//! Plan execution: step executor, plan runner, and audit records.

mod executor;
mod persistence;
mod record;
mod runner;

pub use executor::StepExecutor;
pub use record::{ColumnInfo, ExecutionRecord, RunStatus, StepLog, StepStatus, TableSummary};
pub use runner::{PlanRunner, RunOutcome};
