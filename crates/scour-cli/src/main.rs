//! Scour CLI - data profiling and plan-execution tool.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Profile { file, json, no_issues } => {
            commands::profile::run(file, json, no_issues, cli.verbose)
        }

        Commands::Run {
            plan,
            data,
            output,
            record,
        } => commands::run::run(plan, data, output, record, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
