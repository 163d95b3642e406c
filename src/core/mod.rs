//! # Core Module
//!
//! The GUI-agnostic storage layer.
//!
//! ## Modules
//! - `database` - Opens the database and migrates its schema
//! - `history` - Scan history records
//! - `settings` - Typed settings and the legacy settings table
//! - `cover` - Cover view model and its scan action

pub mod cover;
pub mod database;
pub mod history;
pub mod settings;

// Re-export commonly used types
pub use cover::{CoverAction, CoverView, EventWindow, ScanWindow};
pub use database::{Database, MigrationReport, MigrationStep, StoragePaths};
pub use history::{HistoryPage, HistoryRecord, HistoryRepository};
pub use settings::{Settings, SettingsSink, SettingsStore};
