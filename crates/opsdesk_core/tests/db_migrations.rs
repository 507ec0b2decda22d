use opsdesk_core::db::migrations::latest_version;
use opsdesk_core::db::{open_db, open_db_in_memory, DbError};
use opsdesk_core::{KeyValueStorage, SqliteKeyValueStorage};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "kv_store");
}

#[test]
fn reopening_file_keeps_schema_and_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("opsdesk.db");

    let conn_first = open_db(&path).unwrap();
    SqliteKeyValueStorage::try_new(&conn_first)
        .unwrap()
        .set_item("fleet.drivers", "[]")
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let storage = SqliteKeyValueStorage::try_new(&conn_second).unwrap();
    assert_eq!(
        storage.get_item("fleet.drivers").unwrap().as_deref(),
        Some("[]")
    );
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
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
fn sqlite_storage_requires_migrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    assert!(SqliteKeyValueStorage::try_new(&conn).is_err());
}

#[test]
fn sqlite_storage_upserts_and_lists_keys() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteKeyValueStorage::try_new(&conn).unwrap();

    storage.set_item("vendors.vendors", "[1]").unwrap();
    storage.set_item("crm.campaigns", "[2]").unwrap();
    storage.set_item("vendors.vendors", "[3]").unwrap();

    assert_eq!(
        storage.keys().unwrap(),
        vec!["crm.campaigns".to_string(), "vendors.vendors".to_string()]
    );
    assert_eq!(
        storage.get_item("vendors.vendors").unwrap().as_deref(),
        Some("[3]")
    );

    storage.remove_item("crm.campaigns").unwrap();
    assert_eq!(storage.get_item("crm.campaigns").unwrap(), None);
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
