//! CLI command implementations

pub mod balance;
pub mod bank;
pub mod config;
pub mod logs;
pub mod note;
pub mod profit;
pub mod todo;
pub mod user;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dialoguer::Input;
use rust_decimal::Decimal;
use tally_core::{EntryPoint, Error, LoggingService, TallyContext};

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger(data_dir: &Path, entry_point: EntryPoint) -> Option<LoggingService> {
    std::fs::create_dir_all(data_dir).ok()?;
    LoggingService::new(data_dir, entry_point, env!("CARGO_PKG_VERSION")).ok()
}

/// Record a finished command. Logging errors are ignored.
pub fn log_success(logger: &Option<LoggingService>, command: &str) {
    if let Some(l) = logger {
        let _ = l.log_success(command);
    }
}

/// Record a refused or failed command. Logging errors are ignored.
pub fn log_failure(logger: &Option<LoggingService>, command: &str, err: &Error) {
    if let Some(l) = logger {
        let _ = l.log_failure(command, err);
    }
}

/// Resolve the data directory: `--dir` / `TALLY_DIR`, else `~/.tally`
pub fn resolve_data_dir(dir: Option<PathBuf>) -> Result<PathBuf> {
    match dir {
        Some(dir) => Ok(dir),
        None => dirs::home_dir()
            .map(|home| home.join(".tally"))
            .context("Could not find home directory; pass --dir or set TALLY_DIR"),
    }
}

/// Build the core context for `data_dir`
pub fn get_context(data_dir: &Path) -> Result<TallyContext> {
    TallyContext::new(data_dir).context("Failed to initialize tally context")
}

/// Use `value` if given, otherwise ask for it. Empty answers are allowed so
/// that validation stays in one place.
pub fn value_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?),
    }
}

/// Parse a user-typed amount
pub fn parse_amount(text: &str) -> tally_core::domain::result::Result<Decimal> {
    text.trim()
        .parse::<Decimal>()
        .map_err(|_| Error::invalid_amount(format!("'{}' is not a number.", text.trim())))
}
