//! Event log - one row per finished command in `logs.duckdb`
//!
//! A row says which command ran, how it ended and, for failures, the error
//! text. Amounts, balances, note titles and contents, and user names are
//! never part of a row.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Result};
use chrono::{DateTime, TimeZone, Utc};
use duckdb::{Connection, Row};
use serde::Serialize;

use crate::domain::result::Error;
use crate::log_migrations;

const LOG_DB_FILE: &str = "logs.duckdb";
const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// How the app was driven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryPoint {
    /// One-shot subcommand (`tally deposit 10`)
    Command,
    /// Interactive menu loop (`tally bank`)
    Menu,
}

impl EntryPoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryPoint::Command => "command",
            EntryPoint::Menu => "menu",
        }
    }

    fn from_db(value: &str) -> Self {
        match value {
            "menu" => EntryPoint::Menu,
            _ => EntryPoint::Command,
        }
    }
}

/// How a command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Ok,
    /// The input was refused (bad amount, empty title, ...)
    Rejected,
    /// Something outside the input went wrong (I/O, corrupt data, ...)
    Failed,
}

impl Outcome {
    /// Classify an error from the core library
    pub fn of(err: &Error) -> Self {
        if err.is_user_error() {
            Outcome::Rejected
        } else {
            Outcome::Failed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Ok => "ok",
            Outcome::Rejected => "rejected",
            Outcome::Failed => "failed",
        }
    }

    fn from_db(value: &str) -> Self {
        match value {
            "ok" => Outcome::Ok,
            "rejected" => Outcome::Rejected,
            _ => Outcome::Failed,
        }
    }
}

/// One recorded command
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub id: i64,
    pub recorded_at: DateTime<Utc>,
    pub entry_point: EntryPoint,
    pub version: String,
    pub command: String,
    pub outcome: Outcome,
    pub reason: Option<String>,
}

fn map_entry(row: &Row<'_>) -> duckdb::Result<LogEntry> {
    let recorded_at: i64 = row.get(1)?;
    let entry_point: String = row.get(2)?;
    let outcome: String = row.get(5)?;

    Ok(LogEntry {
        id: row.get(0)?,
        recorded_at: Utc
            .timestamp_millis_opt(recorded_at)
            .single()
            .unwrap_or_default(),
        entry_point: EntryPoint::from_db(&entry_point),
        version: row.get(3)?,
        command: row.get(4)?,
        outcome: Outcome::from_db(&outcome),
        reason: row.get(6)?,
    })
}

/// Counts per outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LogSummary {
    pub ok: u64,
    pub rejected: u64,
    pub failed: u64,
}

impl LogSummary {
    pub fn total(&self) -> u64 {
        self.ok + self.rejected + self.failed
    }
}

/// Cutoff for pruning: `days` before `now_ms`, or `None` when that is
/// not representable
pub fn cutoff_ms(now_ms: i64, days: u64) -> Option<i64> {
    i64::try_from(days)
        .ok()
        .and_then(|days| days.checked_mul(MS_PER_DAY))
        .and_then(|span| now_ms.checked_sub(span))
}

/// Event log over `logs.duckdb`
pub struct LoggingService {
    conn: Mutex<Connection>,
    db_path: PathBuf,
    entry_point: EntryPoint,
    version: String,
}

impl LoggingService {
    /// Open or create `logs.duckdb` in `data_dir`, migrating it if needed
    pub fn new(data_dir: &Path, entry_point: EntryPoint, version: impl Into<String>) -> Result<Self> {
        let db_path = data_dir.join(LOG_DB_FILE);
        let conn = Connection::open(&db_path)?;
        log_migrations::migrate(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
            entry_point,
            version: version.into(),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))
    }

    /// Record how `command` ended
    pub fn record(&self, command: &str, outcome: Outcome, reason: Option<&str>) -> Result<()> {
        self.conn()?.execute(
            "INSERT INTO events (recorded_at, entry_point, version, command, outcome, reason)
             VALUES (?, ?, ?, ?, ?, ?)",
            duckdb::params![
                Utc::now().timestamp_millis(),
                self.entry_point.as_str(),
                &self.version,
                command,
                outcome.as_str(),
                reason,
            ],
        )?;
        Ok(())
    }

    pub fn log_success(&self, command: &str) -> Result<()> {
        self.record(command, Outcome::Ok, None)
    }

    /// Record `err` as a rejection or a failure, depending on its kind
    pub fn log_failure(&self, command: &str, err: &Error) -> Result<()> {
        self.record(command, Outcome::of(err), Some(&err.to_string()))
    }

    /// Latest entries, newest first
    pub fn recent(&self, limit: usize) -> Result<Vec<LogEntry>> {
        self.query("", limit)
    }

    /// Latest rejected or failed entries, newest first
    pub fn failures(&self, limit: usize) -> Result<Vec<LogEntry>> {
        self.query("WHERE outcome <> 'ok'", limit)
    }

    fn query(&self, filter: &str, limit: usize) -> Result<Vec<LogEntry>> {
        let sql = format!(
            "SELECT id, recorded_at, entry_point, version, command, outcome, reason
             FROM events {} ORDER BY id DESC LIMIT ?",
            filter
        );
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let entries = stmt
            .query_map([limit], map_entry)?
            .collect::<duckdb::Result<Vec<_>>>()?;
        Ok(entries)
    }

    pub fn summary(&self) -> Result<LogSummary> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT outcome, COUNT(*) FROM events GROUP BY outcome")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut summary = LogSummary::default();
        for row in rows {
            let (outcome, count) = row?;
            let count = count.max(0) as u64;
            match Outcome::from_db(&outcome) {
                Outcome::Ok => summary.ok += count,
                Outcome::Rejected => summary.rejected += count,
                Outcome::Failed => summary.failed += count,
            }
        }
        Ok(summary)
    }

    /// Delete entries recorded more than `days` days ago
    pub fn prune_older_than(&self, days: u64) -> Result<u64> {
        let cutoff = cutoff_ms(Utc::now().timestamp_millis(), days)
            .ok_or_else(|| anyhow!("Cannot go back {} days", days))?;
        let deleted = self
            .conn()?
            .execute("DELETE FROM events WHERE recorded_at < ?", [cutoff])?;
        Ok(deleted as u64)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn service(dir: &Path, entry_point: EntryPoint) -> LoggingService {
        LoggingService::new(dir, entry_point, "1.0.0").unwrap()
    }

    #[test]
    fn test_creates_database() {
        let dir = tempdir().unwrap();
        let log = service(dir.path(), EntryPoint::Command);
        assert!(log.db_path().exists());
        assert_eq!(log.summary().unwrap().total(), 0);
    }

    #[test]
    fn test_success_entry() {
        let dir = tempdir().unwrap();
        let log = service(dir.path(), EntryPoint::Menu);

        log.log_success("deposit").unwrap();

        let entries = log.recent(10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].command, "deposit");
        assert_eq!(entries[0].outcome, Outcome::Ok);
        assert_eq!(entries[0].entry_point, EntryPoint::Menu);
        assert_eq!(entries[0].version, "1.0.0");
        assert!(entries[0].reason.is_none());
    }

    #[test]
    fn test_failure_is_classified_by_error_kind() {
        let dir = tempdir().unwrap();
        let log = service(dir.path(), EntryPoint::Command);

        log.log_failure("withdraw", &Error::InsufficientFunds).unwrap();
        log.log_failure("note new", &Error::Other("disk full".into()))
            .unwrap();

        let failures = log.failures(10).unwrap();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].outcome, Outcome::Failed);
        assert_eq!(failures[0].reason.as_deref(), Some("disk full"));
        assert_eq!(failures[1].outcome, Outcome::Rejected);
        assert_eq!(failures[1].command, "withdraw");
    }

    #[test]
    fn test_recent_is_newest_first_and_limited() {
        let dir = tempdir().unwrap();
        let log = service(dir.path(), EntryPoint::Command);
        for command in ["balance", "deposit", "withdraw"] {
            log.log_success(command).unwrap();
        }

        let entries = log.recent(2).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].command, "withdraw");
        assert_eq!(entries[1].command, "deposit");
    }

    #[test]
    fn test_summary_counts_outcomes() {
        let dir = tempdir().unwrap();
        let log = service(dir.path(), EntryPoint::Command);
        log.log_success("deposit").unwrap();
        log.log_success("deposit").unwrap();
        log.log_failure("deposit", &Error::invalid_amount("Must be greater than 0."))
            .unwrap();

        let summary = log.summary().unwrap();
        assert_eq!(
            summary,
            LogSummary {
                ok: 2,
                rejected: 1,
                failed: 0
            }
        );
        assert_eq!(summary.total(), 3);
    }

    #[test]
    fn test_reopen_keeps_entries() {
        let dir = tempdir().unwrap();
        service(dir.path(), EntryPoint::Command)
            .log_success("balance")
            .unwrap();

        let log = service(dir.path(), EntryPoint::Command);
        assert_eq!(log.summary().unwrap().ok, 1);
    }

    #[test]
    fn test_prune_keeps_recent_entries() {
        let dir = tempdir().unwrap();
        let log = service(dir.path(), EntryPoint::Command);
        log.log_success("balance").unwrap();

        assert_eq!(log.prune_older_than(1).unwrap(), 0);
        assert_eq!(log.summary().unwrap().total(), 1);
    }

    #[test]
    fn test_prune_with_huge_day_count_is_an_error() {
        let dir = tempdir().unwrap();
        let log = service(dir.path(), EntryPoint::Command);
        log.log_success("balance").unwrap();

        assert!(log.prune_older_than(u64::MAX).is_err());
        assert!(log.prune_older_than(i64::MAX as u64).is_err());
        assert_eq!(log.summary().unwrap().total(), 1);
    }

    #[test]
    fn test_cutoff_ms() {
        assert_eq!(cutoff_ms(3 * MS_PER_DAY, 1), Some(2 * MS_PER_DAY));
        assert_eq!(cutoff_ms(1_000, 0), Some(1_000));
        assert_eq!(cutoff_ms(0, u64::MAX), None);
        assert_eq!(cutoff_ms(i64::MIN + 1, 1), None);
    }
}
