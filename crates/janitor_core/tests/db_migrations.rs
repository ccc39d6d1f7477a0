use janitor_core::db::migrations::latest_version;
use janitor_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn in_memory_database_is_fully_migrated() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "cleaning_logs");
    assert_table_exists(&conn, "cleaning_reports");
}

#[test]
fn reopening_a_file_database_keeps_schema_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("janitor.sqlite3");

    let first = open_db(&path).unwrap();
    first
        .execute(
            "INSERT INTO cleaning_reports (uuid, report_date, area, issue, kind)
             VALUES ('11111111-2222-4333-8444-555555555555', '2026-10-16', 'Gerbang', 'Engsel lepas', 'worker_finding');",
            [],
        )
        .unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second), latest_version());
    let count: i64 = second
        .query_row("SELECT COUNT(*) FROM cleaning_reports;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn newer_schema_version_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 42;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 42);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn status_and_kind_columns_reject_unknown_values() {
    let conn = open_db_in_memory().unwrap();
    let result = conn.execute(
        "INSERT INTO cleaning_logs (uuid, log_date, task, photo_before, photo_after, status)
         VALUES ('a', '2026-10-16', 'x', 'b', 'c', 'pending');",
        [],
    );
    assert!(result.is_err());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
