//! # Database Module
//!
//! Opens the scan database and keeps its schema current.
//!
//! ## Start-up sequence
//! 1. Create `<storage>/Databases` if needed
//! 2. Open `<md5("CodeReader")>.sqlite` inside it
//! 3. Create or upgrade the `history` table
//! 4. Move any legacy `settings` rows into the settings component and
//!    drop the table
//!
//! Only a file that can't be opened is an error. Everything after that
//! is logged and reported in the [`MigrationReport`].

mod migration;
mod paths;

pub use migration::{
    column_names, migrate, table_names, MigrationReport, MigrationStep, FIELD_FORMAT, FIELD_ID,
    FIELD_TIMESTAMP, FIELD_VALUE, HISTORY_TABLE, LEGACY_SETTINGS_TABLE,
};
pub use paths::{database_file_name, StoragePaths, APP_NAME};

use crate::core::history::HistoryRepository;
use crate::core::settings::SettingsSink;
use crate::error::DatabaseError;
use crate::events::{DatabaseEvent, Event, EventSender};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// The application's single database connection
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    paths: StoragePaths,
    report: MigrationReport,
}

impl Database {
    /// Open the database under `paths` and migrate it.
    ///
    /// Legacy settings found in the database are passed to `settings`.
    pub fn initialize(
        paths: &StoragePaths,
        settings: &mut dyn SettingsSink,
        events: &EventSender,
    ) -> Result<Self, DatabaseError> {
        let dir = paths.database_dir();
        std::fs::create_dir_all(&dir).map_err(|source| DatabaseError::CreateDirectory {
            path: dir.clone(),
            source,
        })?;

        let path = paths.database_file();
        tracing::debug!("Database path: {}", path.display());

        let mut conn = Connection::open(&path).map_err(|e| DatabaseError::OpenFailed {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        events.send(Event::Database(DatabaseEvent::Opened { path }));

        let report = migrate(&mut conn, settings, events);
        if !report.warnings.is_empty() {
            tracing::warn!(
                warnings = report.warnings.len(),
                "database initialized with errors"
            );
        }
        events.send(Event::Database(DatabaseEvent::Completed));

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            paths: paths.clone(),
            report,
        })
    }

    /// Run the migration again on the open connection
    pub fn reinitialize(
        &self,
        settings: &mut dyn SettingsSink,
        events: &EventSender,
    ) -> Result<MigrationReport, DatabaseError> {
        let mut conn = self.conn.lock().map_err(|_| DatabaseError::Poisoned {
            path: self.path(),
        })?;
        Ok(migrate(&mut conn, settings, events))
    }

    /// What the initial migration did
    pub fn report(&self) -> &MigrationReport {
        &self.report
    }

    pub fn path(&self) -> PathBuf {
        self.paths.database_file()
    }

    pub fn image_dir(&self) -> PathBuf {
        self.paths.image_dir()
    }

    pub fn storage_dir(&self) -> &Path {
        self.paths.storage_dir()
    }

    /// Shared handle to the connection
    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        Arc::clone(&self.conn)
    }

    /// Scan history stored in this database
    pub fn history(&self) -> HistoryRepository {
        HistoryRepository::new(self.connection())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::Settings;
    use crate::events::{null_sender, EventChannel};
    use tempfile::TempDir;

    #[test]
    fn initialize_creates_database_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StoragePaths::new(temp_dir.path());

        let db = Database::initialize(&paths, &mut Settings::default(), &null_sender()).unwrap();

        assert!(db.path().exists());
        assert_eq!(db.report().steps, vec![MigrationStep::CreatedHistory]);
        // The image dir is only a location
        assert!(!db.image_dir().exists());
    }

    #[test]
    fn initialize_reports_open_and_completion() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StoragePaths::new(temp_dir.path());
        let (sender, receiver) = EventChannel::new();

        Database::initialize(&paths, &mut Settings::default(), &sender).unwrap();

        let events = receiver.drain();
        assert_eq!(
            events.first(),
            Some(&Event::Database(DatabaseEvent::Opened {
                path: paths.database_file()
            }))
        );
        assert_eq!(events.last(), Some(&Event::Database(DatabaseEvent::Completed)));
    }

    #[test]
    fn unwritable_storage_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();

        let result = Database::initialize(
            &StoragePaths::new(&blocker),
            &mut Settings::default(),
            &null_sender(),
        );

        assert!(matches!(result, Err(DatabaseError::CreateDirectory { .. })));
    }

    #[test]
    fn reinitialize_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StoragePaths::new(temp_dir.path());
        let mut settings = Settings::default();
        let db = Database::initialize(&paths, &mut settings, &null_sender()).unwrap();

        let report = db.reinitialize(&mut settings, &null_sender()).unwrap();
        assert!(report.is_noop());
    }
}
