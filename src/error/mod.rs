//! # Error Module
//!
//! Error types for the CodeReader store.
//!
//! ## Design Principles
//! - **Never panic** on stored data - return errors instead
//! - **Include context** - paths, ids, what went wrong
//! - Migration problems are logged and reported, not returned (see
//!   `core::database::MigrationReport`)

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum CodeReaderError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("History error: {0}")]
    History(#[from] HistoryError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that occur while opening the database
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to create database directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open database at {path}: {reason}")]
    OpenFailed { path: PathBuf, reason: String },

    #[error("Database connection at {path} is poisoned")]
    Poisoned { path: PathBuf },
}

/// Errors that occur with the scan history
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("History query failed: {0}")]
    QueryFailed(String),

    #[error("History record not found: {id}")]
    NotFound { id: i64 },

    #[error("History connection is poisoned")]
    Poisoned,
}

impl From<rusqlite::Error> for HistoryError {
    fn from(err: rusqlite::Error) -> Self {
        HistoryError::QueryFailed(err.to_string())
    }
}

/// Errors that occur while reading or writing settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Settings file {path} is not valid: {reason}")]
    Malformed { path: PathBuf, reason: String },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, CodeReaderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_error_includes_path() {
        let error = DatabaseError::OpenFailed {
            path: PathBuf::from("/data/Databases/history.sqlite"),
            reason: "unable to open database file".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("/data/Databases/history.sqlite"));
        assert!(message.contains("unable to open"));
    }

    #[test]
    fn history_not_found_includes_id() {
        let error = HistoryError::NotFound { id: 42 };
        assert!(error.to_string().contains("42"));
    }

    #[test]
    fn nested_errors_convert_to_top_level() {
        let error: CodeReaderError = SettingsError::Malformed {
            path: PathBuf::from("/cfg/settings.json"),
            reason: "expected value".to_string(),
        }
        .into();
        let message = error.to_string();
        assert!(message.starts_with("Settings error"));
        assert!(message.contains("/cfg/settings.json"));
    }
}
