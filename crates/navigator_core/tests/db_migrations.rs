use navigator_core::db::migrations::latest_version;
use navigator_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "entries");
    assert_table_exists(&conn, "value_points");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("navigator.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "entries");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    assert!(err.needs_newer_build());
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn schema_rejects_scores_outside_the_scale() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO entries (entry_uuid, timestamp_ms) VALUES ('e1', 1);",
        [],
    )
    .unwrap();

    let result = conn.execute(
        "INSERT INTO value_points (entry_uuid, point_uuid, position, label, domain, score)
         VALUES ('e1', 'p1', 0, 'Trust', 'Relationships', 6);",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn schema_rejects_unknown_domains() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO entries (entry_uuid, timestamp_ms) VALUES ('e1', 1);",
        [],
    )
    .unwrap();

    let result = conn.execute(
        "INSERT INTO value_points (entry_uuid, point_uuid, position, label, domain, score)
         VALUES ('e1', 'p1', 0, 'Trust', 'Hobbies', 3);",
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
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
