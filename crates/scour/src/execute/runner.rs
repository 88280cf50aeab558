//! Plan orchestration across an ordered step list.

use std::time::Instant;

use crate::plan::{Plan, Step};
use crate::table::{sample_table, Table};

use super::executor::StepExecutor;
use super::record::{ExecutionRecord, RunStatus, StepStatus, TableSummary};

/// The result of running a plan: the final table and its audit record.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// The table as of loop termination (partial progress on failure).
    pub table: Table,
    /// The finalized execution record.
    pub record: ExecutionRecord,
}

/// Runs a plan's steps in order against a table, recording provenance.
///
/// A run moves `running → completed` or `running → failed`. The first step
/// fault stops the loop: remaining steps are not attempted, and the record
/// carries the partial after-summary so a caller can see what the data
/// looked like at the point of failure. Step faults never surface as
/// errors from [`PlanRunner::run`]; callers inspect `record.status`.
#[derive(Debug, Clone, Default)]
pub struct PlanRunner {
    executor: StepExecutor,
}

impl PlanRunner {
    /// Create a new plan runner.
    pub fn new() -> Self {
        Self {
            executor: StepExecutor::new(),
        }
    }

    /// Run a plan against `input`, or the built-in sample table when absent.
    pub fn run(&self, plan: &Plan, input: Option<Table>) -> RunOutcome {
        let start = Instant::now();
        let mut record = ExecutionRecord::start();

        let mut table = input.unwrap_or_else(sample_table);
        record.before_summary = Some(TableSummary::of(&table));

        // Iterate by ascending order; gaps and duplicates are tolerated.
        let mut steps: Vec<&Step> = plan.steps.iter().collect();
        steps.sort_by_key(|s| s.order);

        let mut failed = false;
        for step in steps {
            let (next, log) = self.executor.execute(table, step);
            table = next;
            if log.status == StepStatus::Failed {
                record.error_message = log.error_message.clone();
                record.step_logs.push(log);
                failed = true;
                break;
            }
            record.step_logs.push(log);
        }

        record.after_summary = Some(TableSummary::of(&table));
        let status = if failed {
            RunStatus::Failed
        } else {
            RunStatus::Completed
        };
        record.finalize(status, start.elapsed().as_secs_f64());

        RunOutcome { table, record }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{FillStrategy, StepOp};
    use crate::table::Value;

    fn input_table() -> Table {
        Table::from_columns(vec![
            (
                "v".to_string(),
                vec![1.0.into(), Value::Missing, 3.0.into(), 4.0.into()],
            ),
            (
                "label".to_string(),
                vec!["a".into(), "b".into(), "a".into(), "b".into()],
            ),
        ])
        .unwrap()
    }

    fn fill_step(order: u32) -> Step {
        Step::new(
            order,
            "fill v",
            StepOp::FillMissing {
                column: "v".to_string(),
                strategy: FillStrategy::Mean,
            },
        )
    }

    fn bad_step(order: u32) -> Step {
        Step::new(
            order,
            "drop ghost",
            StepOp::DropColumn {
                column: "ghost".to_string(),
            },
        )
    }

    #[test]
    fn test_completed_run() {
        let plan = Plan::new("clean").with_step(fill_step(1)).with_step(Step::new(
            2,
            "drop label",
            StepOp::DropColumn {
                column: "label".to_string(),
            },
        ));

        let outcome = PlanRunner::new().run(&plan, Some(input_table()));
        assert_eq!(outcome.record.status, RunStatus::Completed);
        assert_eq!(outcome.record.step_logs.len(), 2);
        assert!(outcome.record.error_message.is_none());
        assert_eq!(outcome.table.column_count(), 1);
        assert_eq!(outcome.record.after_summary.as_ref().unwrap().columns, 1);
    }

    #[test]
    fn test_failure_stops_the_loop() {
        // Step 2 faults; step 3 must not run.
        let plan = Plan::new("clean")
            .with_step(fill_step(1))
            .with_step(bad_step(2))
            .with_step(Step::new(
                3,
                "drop label",
                StepOp::DropColumn {
                    column: "label".to_string(),
                },
            ));

        let outcome = PlanRunner::new().run(&plan, Some(input_table()));
        let record = &outcome.record;
        assert_eq!(record.status, RunStatus::Failed);
        assert_eq!(record.step_logs.len(), 2);
        assert_eq!(record.step_logs[0].status, StepStatus::Success);
        assert_eq!(record.step_logs[1].status, StepStatus::Failed);
        assert_eq!(
            record.error_message,
            record.step_logs[1].error_message
        );
        // The after-summary reflects the table after step 1 only: the fill
        // succeeded (no missing cells) and `label` is still present.
        let after = record.after_summary.as_ref().unwrap();
        assert_eq!(after.columns, 2);
        assert_eq!(after.missing_values, 0);
        assert!(outcome.table.contains_column("label"));
    }

    #[test]
    fn test_empty_plan_completes() {
        let plan = Plan::new("noop");
        let outcome = PlanRunner::new().run(&plan, Some(input_table()));
        assert_eq!(outcome.record.status, RunStatus::Completed);
        assert!(outcome.record.step_logs.is_empty());
        assert_eq!(
            outcome.record.before_summary,
            outcome.record.after_summary
        );
    }

    #[test]
    fn test_missing_input_falls_back_to_sample() {
        let plan = Plan::new("noop");
        let outcome = PlanRunner::new().run(&plan, None);
        let before = outcome.record.before_summary.as_ref().unwrap();
        assert_eq!(before.rows, 100);
        assert_eq!(before.columns, 5);
    }

    #[test]
    fn test_steps_run_in_order_value_not_list_position() {
        // Declared out of order: the fill (order 1) must run before the
        // rename (order 2) for the rename target to exist.
        let plan = Plan::new("ordered")
            .with_step(Step::new(
                2,
                "rename",
                StepOp::RenameColumn {
                    from: "v_filled".to_string(),
                    to: "v_done".to_string(),
                },
            ))
            .with_step(Step::new(
                1,
                "rename first",
                StepOp::RenameColumn {
                    from: "v".to_string(),
                    to: "v_filled".to_string(),
                },
            ));

        let outcome = PlanRunner::new().run(&plan, Some(input_table()));
        assert_eq!(outcome.record.status, RunStatus::Completed);
        assert!(outcome.table.contains_column("v_done"));
    }

    #[test]
    fn test_before_summary_matches_standalone_summary() {
        let table = input_table();
        let expected = TableSummary::of(&table);
        let outcome = PlanRunner::new().run(&Plan::new("noop"), Some(table));
        assert_eq!(outcome.record.before_summary, Some(expected));
    }
}
