//! Single-step execution with timing and fault capture.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use crate::plan::Step;
use crate::table::Table;

use super::record::StepLog;

/// Runs one plan step against a table.
///
/// Any fault raised while evaluating the step (an operation error or a
/// panic) is captured in the returned log instead of propagating, and
/// the table comes back unchanged in that case. There is no retry; a
/// single fault is terminal for the step.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepExecutor;

impl StepExecutor {
    /// Create a new step executor.
    pub fn new() -> Self {
        Self
    }

    /// Execute one step, returning the resulting table and its log.
    pub fn execute(&self, table: Table, step: &Step) -> (Table, StepLog) {
        let start = Instant::now();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| step.op.apply(&table)));
        let elapsed = start.elapsed().as_secs_f64();

        match outcome {
            Ok(Ok(next)) => (next, StepLog::success(step.order, &step.name, elapsed)),
            Ok(Err(fault)) => (
                table,
                StepLog::failed(step.order, &step.name, elapsed, fault.to_string()),
            ),
            Err(payload) => (
                table,
                StepLog::failed(step.order, &step.name, elapsed, panic_message(&payload)),
            ),
        }
    }
}

fn panic_message(payload: &Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "step panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Step, StepOp};
    use crate::table::{Table, Value};

    fn one_column_table() -> Table {
        Table::from_columns(vec![(
            "v".to_string(),
            vec![1.0.into(), Value::Missing, 3.0.into()],
        )])
        .unwrap()
    }

    #[test]
    fn test_successful_step() {
        let table = one_column_table();
        let step = Step::new(1, "drop gaps", StepOp::DropMissingRows { columns: None });

        let (next, log) = StepExecutor::new().execute(table, &step);
        assert_eq!(log.status, crate::execute::StepStatus::Success);
        assert!(log.error_message.is_none());
        assert!(log.execution_time >= 0.0);
        assert_eq!(next.row_count(), 2);
    }

    #[test]
    fn test_failed_step_returns_table_unchanged() {
        let table = one_column_table();
        let step = Step::new(
            1,
            "drop ghost",
            StepOp::DropColumn {
                column: "ghost".to_string(),
            },
        );

        let (next, log) = StepExecutor::new().execute(table.clone(), &step);
        assert_eq!(log.status, crate::execute::StepStatus::Failed);
        assert_eq!(
            log.error_message.as_deref(),
            Some("Column 'ghost' not found")
        );
        assert_eq!(next, table);
    }
}
