//! Event log schema, embedded with `include_str!`
//!
//! Each migration has a version number. `schema_version` records the
//! versions already applied, so opening an existing log only runs newer
//! ones.

use anyhow::Result;
use duckdb::Connection;

pub struct Migration {
    pub version: i32,
    pub sql: &'static str,
}

/// Applied in order. Append new entries with the next version number.
pub const LOG_MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("001_events.sql"),
}];

const VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TIMESTAMP DEFAULT current_timestamp
);
"#;

/// Bring the log database up to the latest schema
pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(VERSION_TABLE)?;

    let current: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;

    for migration in LOG_MIGRATIONS.iter().filter(|m| m.version > current) {
        conn.execute_batch(migration.sql)?;
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?)",
            [migration.version],
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versions_are_increasing() {
        let versions: Vec<i32> = LOG_MIGRATIONS.iter().map(|m| m.version).collect();
        assert!(versions.windows(2).all(|w| w[0] < w[1]));
        assert!(versions.iter().all(|v| *v > 0));
    }

    #[test]
    fn test_migrate_twice_applies_once() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        migrate(&conn).unwrap();

        let applied: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(applied, LOG_MIGRATIONS.len() as i64);
    }
}
