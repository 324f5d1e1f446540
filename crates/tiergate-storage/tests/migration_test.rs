//! Schema migrations: fresh database, idempotent re-run, file reopen.

use std::sync::{Arc, Barrier};
use std::thread;

use rusqlite::Connection;
use tempfile::tempdir;

use tiergate_storage::connection::open_connection;
use tiergate_storage::connection::pragmas::apply_busy_timeout;
use tiergate_storage::migrations::{current_version, run_migrations, LATEST_VERSION};

fn table_exists(conn: &Connection, name: &str) -> bool {
    conn.prepare("SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1")
        .and_then(|mut stmt| stmt.exists([name]))
        .unwrap()
}

#[test]
fn fresh_database_reports_version_zero() {
    let conn = Connection::open_in_memory().unwrap();
    assert_eq!(current_version(&conn).unwrap(), 0);
}

#[test]
fn open_connection_migrates_to_latest() {
    let conn = open_connection(None, 1_000).unwrap();
    assert_eq!(current_version(&conn).unwrap(), LATEST_VERSION);
    assert!(table_exists(&conn, "usage_counters"));
    assert!(table_exists(&conn, "schema_version"));
}

#[test]
fn rerunning_migrations_applies_nothing() {
    let conn = open_connection(None, 1_000).unwrap();
    assert_eq!(run_migrations(&conn).unwrap(), 0);
    assert_eq!(current_version(&conn).unwrap(), LATEST_VERSION);
}

#[test]
fn reopening_file_keeps_version() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("usage.db");
    {
        let conn = open_connection(Some(&path), 1_000).unwrap();
        assert_eq!(current_version(&conn).unwrap(), LATEST_VERSION);
    }
    let conn = open_connection(Some(&path), 1_000).unwrap();
    assert_eq!(current_version(&conn).unwrap(), LATEST_VERSION);
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |r| r.get(0))
        .unwrap();
    assert_eq!(rows, i64::from(LATEST_VERSION));
}

#[test]
fn v1_rows_gain_anchor_at_period_start() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE schema_version (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT 'then'
         );
         INSERT INTO schema_version (version) VALUES (1);
         CREATE TABLE usage_counters (
            account_id      TEXT    NOT NULL,
            period          TEXT    NOT NULL,
            period_start_ms INTEGER NOT NULL,
            searches        INTEGER NOT NULL DEFAULT 0,
            ai_analyses     INTEGER NOT NULL DEFAULT 0,
            vin_searches    INTEGER NOT NULL DEFAULT 0,
            exports         INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (account_id, period)
         ) WITHOUT ROWID;
         INSERT INTO usage_counters (account_id, period, period_start_ms, searches)
            VALUES ('a', 'monthly', 1769860800000, 3);",
    )
    .unwrap();

    assert_eq!(run_migrations(&conn).unwrap(), LATEST_VERSION - 1);
    let anchor: i64 = conn
        .query_row(
            "SELECT cycle_anchor_ms FROM usage_counters WHERE account_id = 'a'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(anchor, 1_769_860_800_000);
}

#[test]
fn concurrent_first_open_applies_each_migration_once() {
    let dir = tempdir().unwrap();
    let path = Arc::new(dir.path().join("race.db"));
    let barrier = Arc::new(Barrier::new(6));

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let path = Arc::clone(&path);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let conn = Connection::open(path.as_path()).unwrap();
                apply_busy_timeout(&conn, 10_000).unwrap();
                barrier.wait();
                run_migrations(&conn)
            })
        })
        .collect();

    let mut total = 0;
    for handle in handles {
        total += handle.join().unwrap().expect("no connection may fail to migrate");
    }
    assert_eq!(total, LATEST_VERSION);

    let conn = Connection::open(path.as_path()).unwrap();
    assert_eq!(current_version(&conn).unwrap(), LATEST_VERSION);
}

#[test]
fn negative_counters_rejected_by_schema() {
    let conn = open_connection(None, 1_000).unwrap();
    let result = conn.execute(
        "INSERT INTO usage_counters (account_id, period, period_start_ms, searches)
         VALUES ('a', 'daily', 0, -1)",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn unknown_period_rejected_by_schema() {
    let conn = open_connection(None, 1_000).unwrap();
    let result = conn.execute(
        "INSERT INTO usage_counters (account_id, period, period_start_ms)
         VALUES ('a', 'weekly', 0)",
        [],
    );
    assert!(result.is_err());
}
