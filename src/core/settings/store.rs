//! Settings persisted to a JSON file.

use super::types::{Settings, SettingsSink};
use crate::error::SettingsError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-backed settings.
///
/// Every setter writes the file immediately. Write failures are logged
/// and the in-memory value is kept.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Open the settings file, falling back to defaults if it is missing
    /// or unreadable
    pub fn open(path: &Path) -> Self {
        let settings = match Self::load(path) {
            Ok(Some(settings)) => settings,
            Ok(None) => Settings::default(),
            Err(e) => {
                tracing::warn!("{}; using defaults", e);
                Settings::default()
            }
        };

        Self {
            path: path.to_path_buf(),
            settings,
        }
    }

    /// Read settings from `path`. `Ok(None)` if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Option<Settings>, SettingsError> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&data)
            .map(Some)
            .map_err(|e| SettingsError::Malformed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }

    /// Write the current settings to disk
    pub fn save(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::Malformed {
                path: self.path.clone(),
                reason: e.to_string(),
            }
        })?;

        fs::write(&self.path, json).map_err(|source| SettingsError::Write {
            path: self.path.clone(),
            source,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn update(&mut self, apply: impl FnOnce(&mut Settings)) {
        let before = self.settings.clone();
        apply(&mut self.settings);
        if self.settings == before {
            return;
        }
        if let Err(e) = self.save() {
            tracing::warn!("{}", e);
        }
    }
}

impl SettingsSink for SettingsStore {
    fn set_sound(&mut self, value: bool) {
        self.update(|s| s.set_sound(value));
    }

    fn set_digital_zoom(&mut self, value: i32) {
        self.update(|s| s.set_digital_zoom(value));
    }

    fn set_scan_duration(&mut self, value: i32) {
        self.update(|s| s.set_scan_duration(value));
    }

    fn set_result_view_duration(&mut self, value: i32) {
        self.update(|s| s.set_result_view_duration(value));
    }

    fn set_marker_color(&mut self, value: String) {
        self.update(|s| s.set_marker_color(value));
    }

    fn set_history_size(&mut self, value: i32) {
        self.update(|s| s.set_history_size(value));
    }

    fn set_scan_on_start(&mut self, value: bool) {
        self.update(|s| s.set_scan_on_start(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let store = SettingsStore::open(&temp_dir.path().join("settings.json"));
        assert_eq!(store.settings(), &Settings::default());
    }

    #[test]
    fn setters_persist_across_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("settings.json");

        let mut store = SettingsStore::open(&path);
        store.set_history_size(7);
        store.set_marker_color("#FF0000".to_string());

        let reopened = SettingsStore::open(&path);
        assert_eq!(reopened.settings().history_size, 7);
        assert_eq!(reopened.settings().marker_color, "#FF0000");
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            SettingsStore::load(&path),
            Err(SettingsError::Malformed { .. })
        ));
        let store = SettingsStore::open(&path);
        assert_eq!(store.settings(), &Settings::default());
    }

    #[test]
    fn unchanged_value_does_not_create_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");

        let mut store = SettingsStore::open(&path);
        store.set_sound(Settings::default().sound);

        assert!(!path.exists());
    }
}
