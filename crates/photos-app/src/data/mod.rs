//! Data persistence
//!
//! Favorites backends, settings and the shared JSON storage layer.

pub mod favorites_json;
pub mod favorites_sqlite;
pub mod settings;
pub mod storage;

pub use favorites_json::JsonFavoritesRepository;
pub use favorites_sqlite::SqliteFavoritesRepository;
pub use settings::{Backend, Settings};
pub use storage::{data_dir, ensure_data_dir};

use crate::error::Result;
use photos::favorites::FavoritesRepository;
use std::path::Path;

/// Open the favorites repository for a backend inside `dir`
pub fn open_repository(backend: Backend, dir: &Path) -> Result<Box<dyn FavoritesRepository>> {
    let path = dir.join(backend.file_name());
    log::info!("using {} favorites at {:?}", backend, path);

    Ok(match backend {
        Backend::Json => Box::new(JsonFavoritesRepository::open(path)?),
        Backend::Sqlite => Box::new(SqliteFavoritesRepository::open(path)?),
    })
}
