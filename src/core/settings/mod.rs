//! # Settings Module
//!
//! Typed application settings.
//!
//! ## Features
//! - `SettingsSink` - the typed setters every settings backend exposes
//! - `Settings` - plain values with the application defaults
//! - `SettingsStore` - settings persisted to a JSON file
//! - `legacy` - decoding of the old key/value `settings` table

pub mod legacy;
mod store;
mod types;

pub use legacy::{LegacyKey, LegacySetter, LEGACY_KEYS};
pub use store::SettingsStore;
pub use types::*;
