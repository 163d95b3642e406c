//! Integration tests for database initialization.
//!
//! These tests prepare database files the way older releases left them
//! and verify what a start-up does to them:
//! - Fresh install
//! - Missing format / id columns
//! - Legacy settings transfer
//! - Repeated start-ups

use assert_fs::prelude::*;
use assert_fs::TempDir;
use code_reader::core::database::{
    column_names, table_names, Database, MigrationStep, StoragePaths, HISTORY_TABLE,
    LEGACY_SETTINGS_TABLE,
};
use code_reader::core::settings::{Settings, SettingsStore};
use code_reader::events::null_sender;
use predicates::prelude::*;
use rusqlite::Connection;

/// Create the database file at its final location with `sql` applied
fn seed_database(paths: &StoragePaths, sql: &str) {
    std::fs::create_dir_all(paths.database_dir()).unwrap();
    let conn = Connection::open(paths.database_file()).unwrap();
    conn.execute_batch(sql).unwrap();
}

fn open(paths: &StoragePaths) -> Connection {
    Connection::open(paths.database_file()).unwrap()
}

#[test]
fn fresh_install_creates_four_columns() {
    let temp = TempDir::new().unwrap();
    let paths = StoragePaths::new(temp.path());

    Database::initialize(&paths, &mut Settings::default(), &null_sender()).unwrap();

    temp.child("Databases")
        .child("5dbbf8b4fe9fd37bc8d88c422266ef7b.sqlite")
        .assert(predicate::path::is_file());
    assert_eq!(
        column_names(&open(&paths), HISTORY_TABLE).unwrap(),
        vec!["id", "value", "timestamp", "format"]
    );
}

#[test]
fn missing_format_column_is_added_with_empty_default() {
    let temp = TempDir::new().unwrap();
    let paths = StoragePaths::new(temp.path());
    seed_database(
        &paths,
        "CREATE TABLE history (id INTEGER PRIMARY KEY AUTOINCREMENT, value TEXT, timestamp TEXT);
         INSERT INTO history (value, timestamp) VALUES ('9780201633610', '2017-06-01T12:00:00');",
    );

    let db = Database::initialize(&paths, &mut Settings::default(), &null_sender()).unwrap();

    assert_eq!(db.report().steps, vec![MigrationStep::AddedFormat]);
    let records = db.history().list(10, 0).unwrap().records;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].format, "");
    assert_eq!(records[0].value, "9780201633610");
}

#[test]
fn missing_id_column_rebuild_preserves_rows() {
    let temp = TempDir::new().unwrap();
    let paths = StoragePaths::new(temp.path());
    seed_database(
        &paths,
        "CREATE TABLE history (value TEXT, timestamp TEXT, format TEXT);
         INSERT INTO history VALUES ('first', '2017-01-01T00:00:00', 'QR_CODE');
         INSERT INTO history VALUES ('second', '2017-01-02T00:00:00', 'EAN_13');
         INSERT INTO history VALUES ('third', '2017-01-03T00:00:00', '');",
    );

    let db = Database::initialize(&paths, &mut Settings::default(), &null_sender()).unwrap();

    assert_eq!(db.report().steps, vec![MigrationStep::AddedId]);
    let conn = open(&paths);
    let mut stmt = conn
        .prepare("SELECT id, value, timestamp, format FROM history ORDER BY id")
        .unwrap();
    let rows: Vec<(i64, String, String, String)> = stmt
        .query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(
        rows,
        vec![
            (1, "first".into(), "2017-01-01T00:00:00".into(), "QR_CODE".into()),
            (2, "second".into(), "2017-01-02T00:00:00".into(), "EAN_13".into()),
            (3, "third".into(), "2017-01-03T00:00:00".into(), "".into()),
        ]
    );
    assert!(!table_names(&conn).unwrap().contains(&"history_tmp".to_string()));
}

#[test]
fn legacy_settings_reach_the_settings_file() {
    let temp = TempDir::new().unwrap();
    let paths = StoragePaths::new(temp.path());
    seed_database(
        &paths,
        "CREATE TABLE history (value TEXT, timestamp TEXT);
         CREATE TABLE settings (key TEXT, value TEXT);
         INSERT INTO settings VALUES ('sound', 'true');
         INSERT INTO settings VALUES ('digital_zoom', '2');
         INSERT INTO settings VALUES ('scan_duration', '15');
         INSERT INTO settings VALUES ('result_view_duration', '4.0');
         INSERT INTO settings VALUES ('marker_color', '#FF8000');
         INSERT INTO settings VALUES ('history_size', '100.0');
         INSERT INTO settings VALUES ('scan_on_start', 'false');",
    );

    let mut store = SettingsStore::open(&paths.settings_file());
    let db = Database::initialize(&paths, &mut store, &null_sender()).unwrap();

    assert!(db.report().warnings.is_empty(), "{:?}", db.report().warnings);
    assert!(!table_names(&open(&paths))
        .unwrap()
        .contains(&LEGACY_SETTINGS_TABLE.to_string()));

    let expected = Settings {
        sound: true,
        digital_zoom: 2,
        scan_duration: 15,
        result_view_duration: 4,
        marker_color: "#FF8000".to_string(),
        history_size: 100,
        scan_on_start: false,
    };
    assert_eq!(store.settings(), &expected);

    temp.child("settings.json")
        .assert(predicate::str::contains("\"result_view_duration\": 4"));
    assert_eq!(SettingsStore::open(&paths.settings_file()).settings(), &expected);
}

#[test]
fn legacy_table_is_dropped_even_when_values_are_bad() {
    let temp = TempDir::new().unwrap();
    let paths = StoragePaths::new(temp.path());
    seed_database(
        &paths,
        "CREATE TABLE history (id INTEGER PRIMARY KEY AUTOINCREMENT, value TEXT, timestamp TEXT, format TEXT);
         CREATE TABLE settings (key TEXT, value TEXT);
         INSERT INTO settings VALUES ('scan_duration', 'forever');",
    );

    let mut settings = Settings::default();
    let db = Database::initialize(&paths, &mut settings, &null_sender()).unwrap();

    assert_eq!(db.report().warnings.len(), 1);
    assert_eq!(settings, Settings::default());
    assert!(!table_names(&open(&paths))
        .unwrap()
        .contains(&LEGACY_SETTINGS_TABLE.to_string()));
}

#[test]
fn restart_on_migrated_database_changes_nothing() {
    let temp = TempDir::new().unwrap();
    let paths = StoragePaths::new(temp.path());
    seed_database(
        &paths,
        "CREATE TABLE history (value TEXT, timestamp TEXT);
         INSERT INTO history VALUES ('a', 't');
         CREATE TABLE settings (key TEXT, value TEXT);",
    );

    let first = Database::initialize(&paths, &mut Settings::default(), &null_sender()).unwrap();
    assert!(!first.report().is_noop());
    drop(first);

    let second = Database::initialize(&paths, &mut Settings::default(), &null_sender()).unwrap();
    assert!(second.report().is_noop(), "{:?}", second.report());
    assert_eq!(second.history().count().unwrap(), 1);
}
