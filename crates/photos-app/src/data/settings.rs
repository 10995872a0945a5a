//! Application settings management
//!
//! User preferences persisted next to the favorites.

use crate::config::storage::SETTINGS_VERSION;
use crate::data::storage;
use crate::error::{AppError, Result};
use crate::view::LayoutType;
use photos::config::paging::DEFAULT_PER_PAGE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Favorites persistence backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Json,
    Sqlite,
}

impl Backend {
    /// File name of the backend's store inside the data directory
    pub fn file_name(self) -> &'static str {
        match self {
            Backend::Json => crate::config::storage::FAVORITES_FILE,
            Backend::Sqlite => crate::config::storage::FAVORITES_DB,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Json => write!(f, "json"),
            Backend::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl FromStr for Backend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Backend::Json),
            "sqlite" | "db" => Ok(Backend::Sqlite),
            other => Err(AppError::Config(format!("unknown backend '{}'", other))),
        }
    }
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// File format version
    #[serde(default = "default_version")]
    pub version: u32,

    // === Display ===
    /// Photo list layout
    #[serde(default)]
    pub layout: LayoutType,

    /// Photos requested per page
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    // === Storage ===
    /// Favorites backend
    #[serde(default)]
    pub backend: Backend,
}

fn default_version() -> u32 {
    SETTINGS_VERSION
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            layout: LayoutType::default(),
            per_page: default_per_page(),
            backend: Backend::default(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a specific path; defaults if absent
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut settings = storage::load_from::<Settings>(path)?.unwrap_or_default();
        if settings.per_page == 0 {
            settings.per_page = DEFAULT_PER_PAGE;
        }
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        storage::save_to(path, self)
    }

    /// Switch between list and grid
    pub fn toggle_layout(&mut self) -> LayoutType {
        self.layout = self.layout.toggled();
        self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU32, Ordering};

    static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

    fn temp_path() -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        temp_dir().join(format!("photos_settings_test_{}_{}.json", std::process::id(), id))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.version, SETTINGS_VERSION);
        assert_eq!(settings.layout, LayoutType::List);
        assert_eq!(settings.per_page, DEFAULT_PER_PAGE);
        assert_eq!(settings.backend, Backend::Json);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::load_from(&temp_path()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path();
        let mut settings = Settings::new();
        settings.toggle_layout();
        settings.backend = Backend::Sqlite;
        settings.per_page = 30;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.layout, LayoutType::Grid);
        assert_eq!(loaded.backend, Backend::Sqlite);
        assert_eq!(loaded.per_page, 30);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = temp_path();
        fs::write(&path, r#"{"layout": "grid", "per_page": 0}"#).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.layout, LayoutType::Grid);
        assert_eq!(loaded.per_page, DEFAULT_PER_PAGE);
        assert_eq!(loaded.backend, Backend::Json);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("JSON".parse::<Backend>().unwrap(), Backend::Json);
        assert_eq!(" sqlite ".parse::<Backend>().unwrap(), Backend::Sqlite);
        assert!("csv".parse::<Backend>().is_err());
    }
}
