//! Storage locations of the database and its companions.

use md5::{Digest, Md5};
use std::path::{Path, PathBuf};

/// Name the database file is derived from
pub const APP_NAME: &str = "CodeReader";
pub const DATABASES_DIR: &str = "Databases";
pub const IMAGES_DIR: &str = "images";
pub const SETTINGS_FILE: &str = "settings.json";

/// File name of the database for `app_name`: hex md5 of the name plus
/// `.sqlite`, the scheme the offline storage layer has always used.
pub fn database_file_name(app_name: &str) -> String {
    let digest = Md5::digest(app_name.as_bytes());
    format!("{}.sqlite", hex::encode(digest))
}

/// Paths under the application's offline storage directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    storage_dir: PathBuf,
}

impl StoragePaths {
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
        }
    }

    /// `<data dir>/code-reader`, or the current directory if the platform
    /// has no data dir
    pub fn default_storage_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("code-reader")
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    pub fn database_dir(&self) -> PathBuf {
        self.storage_dir.join(DATABASES_DIR)
    }

    pub fn database_file(&self) -> PathBuf {
        self.database_dir().join(database_file_name(APP_NAME))
    }

    /// Where scanned images go. Not created until something is stored.
    pub fn image_dir(&self) -> PathBuf {
        self.database_dir().join(IMAGES_DIR)
    }

    pub fn settings_file(&self) -> PathBuf {
        self.storage_dir.join(SETTINGS_FILE)
    }
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(Self::default_storage_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_is_md5_of_app_name() {
        assert_eq!(
            database_file_name(APP_NAME),
            "5dbbf8b4fe9fd37bc8d88c422266ef7b.sqlite"
        );
    }

    #[test]
    fn paths_live_under_storage_dir() {
        let paths = StoragePaths::new("/data/app");
        assert_eq!(paths.database_dir(), PathBuf::from("/data/app/Databases"));
        assert_eq!(
            paths.database_file(),
            PathBuf::from("/data/app/Databases/5dbbf8b4fe9fd37bc8d88c422266ef7b.sqlite")
        );
        assert_eq!(paths.image_dir(), PathBuf::from("/data/app/Databases/images"));
        assert_eq!(paths.settings_file(), PathBuf::from("/data/app/settings.json"));
    }
}
