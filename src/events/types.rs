//! Event type definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Database initialization events
    Database(DatabaseEvent),
    /// Requests forwarded to the application window
    Window(WindowEvent),
}

/// Events during database initialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DatabaseEvent {
    /// The database file was opened
    Opened { path: PathBuf },
    /// A fresh history table was created
    HistoryCreated,
    /// The format column was added to an existing history table
    FormatColumnAdded,
    /// The history table was rebuilt with an id primary key
    IdColumnAdded,
    /// A legacy setting was copied into the settings component
    SettingMigrated { key: String },
    /// The legacy settings table was dropped
    LegacySettingsDropped,
    /// A step failed; initialization continues
    Warning { message: String },
    /// Initialization finished
    Completed,
}

/// Requests sent to the application window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowEvent {
    /// Start scanning
    StartScan,
    /// Bring the window to the foreground
    Activate,
}

impl std::fmt::Display for DatabaseEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Opened { path } => write!(f, "Opened {}", path.display()),
            Self::HistoryCreated => write!(f, "Created history table"),
            Self::FormatColumnAdded => write!(f, "Added format column"),
            Self::IdColumnAdded => write!(f, "Added id column"),
            Self::SettingMigrated { key } => write!(f, "Migrated setting {}", key),
            Self::LegacySettingsDropped => write!(f, "Dropped legacy settings table"),
            Self::Warning { message } => write!(f, "Warning: {}", message),
            Self::Completed => write!(f, "Initialization complete"),
        }
    }
}
