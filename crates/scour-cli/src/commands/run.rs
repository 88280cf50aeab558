//! Run command - execute a cleaning plan and save the results.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use scour::{Plan, PlanRunner, RunStatus, StepStatus, Table};

pub fn run(
    plan_path: PathBuf,
    data: Option<PathBuf>,
    output: Option<PathBuf>,
    record_path: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !plan_path.exists() {
        return Err(format!("Plan not found: {}", plan_path.display()).into());
    }

    let plan: Plan = serde_json::from_str(&fs::read_to_string(&plan_path)?)?;

    let table = match &data {
        Some(path) => {
            if !path.exists() {
                return Err(format!("File not found: {}", path.display()).into());
            }
            Some(Table::from_csv_path(path)?)
        }
        None => None,
    };

    println!(
        "{} {} ({} steps)",
        "Running".cyan().bold(),
        plan.name.white(),
        plan.steps.len()
    );
    if data.is_none() {
        println!("  no data file given, using the built-in sample table");
    }

    let outcome = PlanRunner::new().run(&plan, table);
    let record = &outcome.record;

    println!();
    for log in &record.step_logs {
        let marker = match log.status {
            StepStatus::Success => "ok".green(),
            StepStatus::Failed => "failed".red().bold(),
        };
        println!(
            "  {:>2}. {:30} {} ({:.3}s)",
            log.order,
            log.name,
            marker,
            log.execution_time
        );
        if verbose {
            if let Some(msg) = &log.error_message {
                println!("      {}", msg.red());
            }
        }
    }

    println!();
    match record.status {
        RunStatus::Completed => println!("{}", "Run completed".green().bold()),
        RunStatus::Failed => {
            println!(
                "{}: {}",
                "Run failed".red().bold(),
                record.error_message.as_deref().unwrap_or("unknown error")
            );
        }
        RunStatus::Running => unreachable!("runner always finalizes the record"),
    }

    if let (Some(before), Some(after)) = (&record.before_summary, &record.after_summary) {
        println!(
            "  before: {} rows x {} columns, {} missing",
            before.rows, before.columns, before.missing_values
        );
        println!(
            "  after:  {} rows x {} columns, {} missing",
            after.rows, after.columns, after.missing_values
        );
    }

    let output_path = output.unwrap_or_else(|| derived_path(&plan_path, "out.csv"));
    fs::write(&output_path, outcome.table.to_csv_string()?)?;
    println!();
    println!(
        "{} {}",
        "Saved data to".green().bold(),
        output_path.display().to_string().white()
    );

    let record_path = record_path.unwrap_or_else(|| derived_path(&plan_path, "record.json"));
    record.save(&record_path)?;
    println!(
        "{} {}",
        "Saved record to".green().bold(),
        record_path.display().to_string().white()
    );

    if record.status == RunStatus::Failed {
        std::process::exit(1);
    }
    Ok(())
}

fn derived_path(plan_path: &PathBuf, suffix: &str) -> PathBuf {
    let mut p = plan_path.clone();
    let stem = p.file_stem().unwrap_or_default().to_string_lossy().to_string();
    p.set_file_name(format!("{}.{}", stem, suffix));
    p
}
