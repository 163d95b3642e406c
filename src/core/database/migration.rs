//! Schema upgrades and the one-time legacy settings transfer.
//!
//! Every step is best effort: a failing statement is logged, recorded in
//! the report and the remaining steps still run.

use crate::core::settings::{SettingsSink, LEGACY_KEYS};
use crate::events::{DatabaseEvent, Event, EventSender};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;

pub const HISTORY_TABLE: &str = "history";
pub const LEGACY_SETTINGS_TABLE: &str = "settings";

pub const FIELD_ID: &str = "id";
pub const FIELD_VALUE: &str = "value";
pub const FIELD_TIMESTAMP: &str = "timestamp";
pub const FIELD_FORMAT: &str = "format";

const CREATE_HISTORY: &str = "CREATE TABLE history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    value TEXT,
    timestamp TEXT,
    format TEXT
)";

const ADD_FORMAT: &str = "ALTER TABLE history ADD COLUMN format TEXT DEFAULT ''";

// SQLite can't add a primary key to an existing table, so the table is
// rebuilt and renamed.
const ADD_ID: &[&str] = &[
    "CREATE TABLE history_tmp (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        value TEXT,
        timestamp TEXT,
        format TEXT
    )",
    "INSERT INTO history_tmp (value, timestamp, format)
     SELECT value, timestamp, format FROM history",
    "DROP TABLE history",
    "ALTER TABLE history_tmp RENAME TO history",
];

const SELECT_LEGACY_VALUE: &str = "SELECT value FROM settings WHERE key = ?";
const DROP_LEGACY_SETTINGS: &str = "DROP TABLE IF EXISTS settings";

/// A change made by [`migrate`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationStep {
    CreatedHistory,
    AddedFormat,
    AddedId,
    MigratedSettings { applied: Vec<String> },
    DroppedLegacySettings,
}

/// What [`migrate`] did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub steps: Vec<MigrationStep>,
    pub warnings: Vec<String>,
}

impl MigrationReport {
    /// True if the database was already up to date
    pub fn is_noop(&self) -> bool {
        self.steps.is_empty() && self.warnings.is_empty()
    }
}

/// Bring the schema up to date and move legacy settings into `settings`.
///
/// Safe to call on every start: an up-to-date database is left untouched.
pub fn migrate(
    conn: &mut Connection,
    settings: &mut dyn SettingsSink,
    events: &EventSender,
) -> MigrationReport {
    let mut migrator = Migrator {
        events,
        report: MigrationReport::default(),
    };

    let tables = migrator.table_names(conn);
    tracing::debug!(?tables, "existing tables");

    if tables.iter().any(|t| t == HISTORY_TABLE) {
        migrator.upgrade_history(conn);
    } else {
        migrator.create_history(conn);
    }

    if tables.iter().any(|t| t == LEGACY_SETTINGS_TABLE) {
        migrator.migrate_settings(conn, settings);
    }

    migrator.report
}

/// Column names of `table`, in declaration order
pub fn column_names(conn: &Connection, table: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(names)
}

/// Names of all tables in the database
pub fn table_names(conn: &Connection) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table'")?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(names)
}

struct Migrator<'a> {
    events: &'a EventSender,
    report: MigrationReport,
}

impl Migrator<'_> {
    fn warn(&mut self, context: &str, err: impl std::fmt::Display) {
        let message = format!("{}: {}", context, err);
        tracing::warn!("{}", message);
        self.events.send(Event::Database(DatabaseEvent::Warning {
            message: message.clone(),
        }));
        self.report.warnings.push(message);
    }

    fn step(&mut self, step: MigrationStep, event: DatabaseEvent) {
        tracing::debug!("{}", event);
        self.events.send(Event::Database(event));
        self.report.steps.push(step);
    }

    fn table_names(&mut self, conn: &Connection) -> Vec<String> {
        table_names(conn).unwrap_or_else(|e| {
            self.warn("Failed to list tables", e);
            Vec::new()
        })
    }

    fn columns(&mut self, conn: &Connection) -> Vec<String> {
        column_names(conn, HISTORY_TABLE).unwrap_or_else(|e| {
            self.warn("Failed to read history columns", e);
            Vec::new()
        })
    }

    fn create_history(&mut self, conn: &Connection) {
        tracing::debug!("Initializing the database");
        match conn.execute_batch(CREATE_HISTORY) {
            Ok(()) => self.step(MigrationStep::CreatedHistory, DatabaseEvent::HistoryCreated),
            Err(e) => self.warn("Failed to create history table", e),
        }
    }

    fn upgrade_history(&mut self, conn: &mut Connection) {
        let mut columns = self.columns(conn);

        if !columns.iter().any(|c| c == FIELD_FORMAT) {
            tracing::debug!("Adding {} to the database", FIELD_FORMAT);
            match conn.execute_batch(ADD_FORMAT) {
                Ok(()) => {
                    self.step(MigrationStep::AddedFormat, DatabaseEvent::FormatColumnAdded)
                }
                Err(e) => self.warn("Failed to add format column", e),
            }
            columns = self.columns(conn);
        }

        // An unreadable column list means there is nothing safe to rebuild
        if !columns.is_empty() && !columns.iter().any(|c| c == FIELD_ID) {
            tracing::debug!("Adding {} to the database", FIELD_ID);
            self.rebuild_with_id(conn);
        }
    }

    fn rebuild_with_id(&mut self, conn: &mut Connection) {
        let tx = match conn.transaction() {
            Ok(tx) => tx,
            Err(e) => {
                self.warn("Failed to begin transaction", e);
                return;
            }
        };

        for sql in ADD_ID {
            if let Err(e) = tx.execute_batch(sql) {
                self.warn("Failed to add id column", e);
                if let Err(e) = tx.rollback() {
                    self.warn("Failed to roll back", e);
                }
                return;
            }
        }

        match tx.commit() {
            Ok(()) => self.step(MigrationStep::AddedId, DatabaseEvent::IdColumnAdded),
            Err(e) => self.warn("Failed to commit id column", e),
        }
    }

    fn migrate_settings(&mut self, conn: &Connection, settings: &mut dyn SettingsSink) {
        tracing::debug!("Migrating settings");
        let mut applied = Vec::new();

        for legacy in LEGACY_KEYS {
            let value = match Self::legacy_value(conn, legacy.key) {
                Ok(Some(Value::Null)) | Ok(None) => {
                    tracing::debug!(key = legacy.key, "not in legacy settings");
                    continue;
                }
                Ok(Some(value)) => value,
                Err(e) => {
                    self.warn(&format!("Failed to read setting {}", legacy.key), e);
                    continue;
                }
            };

            match legacy.apply(settings, &value) {
                Ok(shown) => {
                    tracing::debug!("{} = {}", legacy.key, shown);
                    self.events.send(Event::Database(DatabaseEvent::SettingMigrated {
                        key: legacy.key.to_string(),
                    }));
                    applied.push(legacy.key.to_string());
                }
                Err(reason) => self.warn(legacy.key, reason),
            }
        }

        self.report
            .steps
            .push(MigrationStep::MigratedSettings { applied });

        // Dropped whether or not the values made it across
        match conn.execute_batch(DROP_LEGACY_SETTINGS) {
            Ok(()) => self.step(
                MigrationStep::DroppedLegacySettings,
                DatabaseEvent::LegacySettingsDropped,
            ),
            Err(e) => self.warn("Failed to drop legacy settings", e),
        }
    }

    fn legacy_value(conn: &Connection, key: &str) -> rusqlite::Result<Option<Value>> {
        conn.query_row(SELECT_LEGACY_VALUE, [key], |row| row.get::<_, Value>(0))
            .optional()
    }
}
