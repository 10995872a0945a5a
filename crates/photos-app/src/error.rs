//! Error types for the photos app services
//!
//! Application-level errors that wrap core errors and add app-specific variants.

use photos::error::PhotosError;
use thiserror::Error;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] PhotosError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Core(PhotosError::Io(e))
    }
}

impl From<AppError> for PhotosError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::Core(inner) => inner,
            other => PhotosError::Storage(other.to_string()),
        }
    }
}

/// Result type alias for the photos app services
pub type Result<T> = std::result::Result<T, AppError>;
