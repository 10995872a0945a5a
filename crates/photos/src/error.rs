//! Error types for the photos core
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Main error type for the favorites core
#[derive(Error, Debug)]
pub enum PhotosError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown photo source: {0}")]
    InvalidSource(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for PhotosError {
    fn from(e: serde_json::Error) -> Self {
        PhotosError::Parse(e.to_string())
    }
}

/// Result type alias for the photos core
pub type Result<T> = std::result::Result<T, PhotosError>;
