//! Xcode Group Sync CLI
//!
//! Synchronizes one Xcode group and one target's sources build phase with
//! the files in a folder.

mod cli;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;
use groupsync_core::{GroupSync, SyncOutcome, SyncReport};

use cli::Cli;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    if let Err(e) = logging::init(verbose) {
        eprintln!("{}: failed to set up logging: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");

    let config = cli.into_config()?;
    let report = GroupSync::new(config).run()?;

    match report.outcome {
        SyncOutcome::Applied => {
            println!("✅ Successfully processed files for {}.", report.target);
            if verbose {
                print_changes(&report);
            }
        }
        SyncOutcome::Skipped => {
            println!("💨 Skipping processing files for {}.", report.target);
        }
        SyncOutcome::DryRun => {
            println!(
                "{} Would process files for {}; nothing was written.",
                "[dry-run]".yellow().bold(),
                report.target
            );
            print_changes(&report);
        }
    }

    Ok(())
}

fn print_changes(report: &SyncReport) {
    for path in &report.group_removed {
        println!("   {} {}", "-".red().bold(), path);
    }
    for path in &report.group_added {
        println!("   {} {}", "+".green().bold(), path);
    }
    for path in &report.phase_removed {
        println!("   {} {} {}", "-".red().bold(), path, "(build phase)".dimmed());
    }
    if !report.orphans_removed.is_empty() {
        println!(
            "   {} file reference(s) deleted",
            report.orphans_removed.len().to_string().cyan()
        );
    }
}
