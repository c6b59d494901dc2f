//! Logs command - view and prune the event log

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use tally_core::services::LogEntry;
use tally_core::{EntryPoint, LoggingService, Outcome};

use crate::output;

#[derive(Subcommand)]
pub enum LogsCommands {
    /// Show recent log entries
    List {
        /// Number of entries to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
        /// Show only rejected and failed commands
        #[arg(long)]
        failures: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete old log entries
    Clear {
        /// Delete entries older than N days
        #[arg(long, default_value = "30")]
        older_than_days: u64,
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show counts per outcome and the database path
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn open_log(data_dir: &Path) -> Result<LoggingService> {
    std::fs::create_dir_all(data_dir)?;
    LoggingService::new(data_dir, EntryPoint::Command, env!("CARGO_PKG_VERSION"))
}

fn format_time(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn outcome_cell(outcome: Outcome) -> String {
    match outcome {
        Outcome::Ok => outcome.as_str().green().to_string(),
        Outcome::Rejected => outcome.as_str().yellow().to_string(),
        Outcome::Failed => outcome.as_str().red().to_string(),
    }
}

fn print_entries(entries: Vec<LogEntry>) {
    let mut table = output::create_table();
    table.set_header(vec!["Time", "Entry", "Command", "Outcome", "Reason"]);

    for entry in entries {
        table.add_row(vec![
            format_time(&entry.recorded_at),
            entry.entry_point.as_str().to_string(),
            entry.command,
            outcome_cell(entry.outcome),
            entry.reason.unwrap_or_default(),
        ]);
    }

    println!("{}", table);
}

pub fn run(data_dir: &Path, command: LogsCommands) -> Result<()> {
    let log = open_log(data_dir)?;

    match command {
        LogsCommands::List {
            limit,
            failures,
            json,
        } => {
            let entries = if failures {
                log.failures(limit)?
            } else {
                log.recent(limit)?
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("No log entries found.");
            } else {
                print_entries(entries);
            }
        }
        LogsCommands::Clear {
            older_than_days,
            force,
            json,
        } => {
            if !force && !json {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete entries older than {} days?", older_than_days))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            let deleted = log.prune_older_than(older_than_days)?;

            if json {
                println!("{}", serde_json::json!({ "deleted": deleted }));
            } else {
                output::success(&format!("Deleted {} log entries", deleted));
            }
        }
        LogsCommands::Stats { json } => {
            let summary = log.summary()?;
            let db_path = log.db_path();
            let size_bytes = std::fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);

            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "ok": summary.ok,
                        "rejected": summary.rejected,
                        "failed": summary.failed,
                        "total": summary.total(),
                        "database_path": db_path.to_string_lossy(),
                        "database_size_bytes": size_bytes
                    })
                );
            } else {
                println!("{}", "Event log".bold());
                println!("  Commands: {}", summary.total());
                println!("  Ok: {}", summary.ok);
                println!("  Rejected: {}", summary.rejected);
                println!("  Failed: {}", summary.failed);
                println!("  Database: {}", db_path.display());
                println!("  Size: {}", output::format_size(size_bytes));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tally_core::Error;

    #[test]
    fn test_format_time() {
        let time = Utc.timestamp_millis_opt(0).single().unwrap();
        assert_eq!(format_time(&time), "1970-01-01 00:00:00");
    }

    #[test]
    fn test_clear_with_huge_day_count_fails_and_keeps_entries() {
        let dir = tempfile::tempdir().unwrap();
        let log = open_log(dir.path()).unwrap();
        log.log_failure("withdraw", &Error::InsufficientFunds).unwrap();
        drop(log);

        let command = LogsCommands::Clear {
            older_than_days: u64::MAX,
            force: true,
            json: true,
        };
        assert!(run(dir.path(), command).is_err());

        let log = open_log(dir.path()).unwrap();
        assert_eq!(log.summary().unwrap().rejected, 1);
    }
}
