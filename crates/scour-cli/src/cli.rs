//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Scour: data profiling and plan-execution tool
#[derive(Parser)]
#[command(name = "scour")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Profile a CSV file and report data-quality issues
    Profile {
        /// Path to the data file (CSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output the profile as JSON instead of a formatted report
        #[arg(long)]
        json: bool,

        /// Skip quality-issue detection
        #[arg(long)]
        no_issues: bool,
    },

    /// Execute a cleaning plan against a CSV file
    Run {
        /// Path to the plan file (JSON)
        #[arg(value_name = "PLAN")]
        plan: PathBuf,

        /// Path to the data file (default: built-in sample table)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Output path for the cleaned data (default: <plan>.out.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output path for the execution record (default: <plan>.record.json)
        #[arg(short, long)]
        record: Option<PathBuf>,
    },
}
