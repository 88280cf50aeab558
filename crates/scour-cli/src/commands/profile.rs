//! Profile command - profile a CSV file and report quality issues.

use std::path::PathBuf;

use colored::Colorize;
use scour::{QualityDetector, Severity, Table, TableProfiler};

pub fn run(
    file: PathBuf,
    json: bool,
    no_issues: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let table = Table::from_csv_path(&file)?;
    let profile = TableProfiler::new().profile(&table);
    let issues = if no_issues {
        Vec::new()
    } else {
        QualityDetector::new().detect(&profile)
    };

    if json {
        #[derive(serde::Serialize)]
        struct Report<'a> {
            profile: &'a scour::TableProfile,
            issues: &'a [scour::QualityIssue],
        }
        println!(
            "{}",
            serde_json::to_string_pretty(&Report {
                profile: &profile,
                issues: &issues,
            })?
        );
        return Ok(());
    }

    println!(
        "{} {}",
        "Profiling".cyan().bold(),
        file.display().to_string().white()
    );
    println!();
    println!(
        "{} rows x {} columns, {} missing cells ({:.1}%)",
        profile.rows.to_string().white().bold(),
        profile.columns.to_string().white().bold(),
        profile.missing_values,
        profile.missing_rate * 100.0
    );
    println!(
        "  {} numeric, {} categorical, {} datetime",
        profile.numeric_columns.len(),
        profile.categorical_columns.len(),
        profile.datetime_columns.len()
    );

    if verbose {
        println!();
        println!("{}", "Columns:".yellow().bold());
        for (name, col) in &profile.column_profiles {
            let mut line = format!(
                "  {:20} {:12} missing {:>5.1}%  unique {}",
                name,
                col.dtype_category.label(),
                col.missing_rate * 100.0,
                col.unique
            );
            if let Some(num) = &col.numeric {
                line.push_str(&format!(
                    "  mean {:.2}  std {:.2}  [{:.2}, {:.2}]",
                    num.mean, num.std, num.min, num.max
                ));
            }
            println!("{}", line);
        }
    }

    if no_issues {
        return Ok(());
    }

    println!();
    if issues.is_empty() {
        println!("{}", "No issues found - data looks clean!".green());
    } else {
        println!(
            "Found {} issues",
            issues.len().to_string().white().bold()
        );
        for issue in &issues {
            let severity = match issue.severity {
                Severity::High => "high".red().bold(),
                Severity::Medium => "medium".yellow(),
                Severity::Low => "low".blue(),
            };
            println!("  [{}] {}", severity, issue.message);
            if verbose {
                println!("         {}", issue.suggestion.dimmed());
            }
        }
    }

    Ok(())
}
