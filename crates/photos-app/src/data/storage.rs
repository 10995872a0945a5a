//! Storage layer for JSON persistence
//!
//! File I/O shared by the favorites file and the settings file. Writes go
//! to a sibling temp file that is renamed over the target, so a failed
//! write never leaves a half-written document behind.

use crate::config::app::NAME;
use crate::error::{AppError, Result};
use photos::error::PhotosError;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Get the application data directory path
pub fn data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|p| p.join(NAME))
        .ok_or_else(|| AppError::Config(
            "Could not determine data directory. HOME environment variable may not be set.".to_string()
        ))
}

/// Ensure the data directory exists, creating it if necessary
pub fn ensure_data_dir() -> Result<PathBuf> {
    let dir = data_dir()?;
    create_dir_if_needed(&dir)?;
    Ok(dir)
}

fn storage_error(msg: String) -> AppError {
    AppError::Core(PhotosError::Storage(msg))
}

/// Create a directory if it doesn't exist, with proper error handling
pub fn create_dir_if_needed(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| {
        storage_error(match e.kind() {
            ErrorKind::PermissionDenied => {
                format!("Permission denied: cannot create directory {:?}", path)
            }
            _ => format!("Failed to create directory {:?}: {}", path, e),
        })
    })
}

/// Read file contents; `None` if the file doesn't exist
fn read_file(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => Err(storage_error(format!(
            "Permission denied: cannot read {:?}",
            path
        ))),
        Err(e) => Err(storage_error(format!("Failed to read {:?}: {}", path, e))),
    }
}

/// Write via temp file + rename
fn write_file(path: &Path, content: &str) -> Result<()> {
    let tmp = path.with_extension("tmp");
    let result = fs::write(&tmp, content).and_then(|()| fs::rename(&tmp, path));
    result.map_err(|e| {
        let _ = fs::remove_file(&tmp);
        storage_error(match e.kind() {
            ErrorKind::PermissionDenied => {
                format!("Permission denied: cannot write to {:?}", path)
            }
            ErrorKind::NotFound => {
                format!("Cannot write to {:?}: parent directory does not exist", path)
            }
            _ => format!("Failed to write to {:?}: {}", path, e),
        })
    })
}

/// Load data from a JSON file at a specific path
///
/// Returns `None` if the file doesn't exist or is empty.
/// Returns an error if the file exists but can't be read or parsed.
pub fn load_from<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let content = match read_file(path)? {
        Some(c) => c,
        None => return Ok(None),
    };

    if content.trim().is_empty() {
        return Ok(None);
    }

    let data = serde_json::from_str(&content)
        .map_err(|e| storage_error(format!("Failed to parse {:?}: {}", path, e)))?;

    Ok(Some(data))
}

/// Save data to a JSON file at a specific path
///
/// Creates parent directories if they don't exist.
pub fn save_to<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_if_needed(parent)?;
        }
    }

    let content = serde_json::to_string_pretty(data)
        .map_err(|e| storage_error(format!("Failed to serialize data: {}", e)))?;

    write_file(path, &content)
}
