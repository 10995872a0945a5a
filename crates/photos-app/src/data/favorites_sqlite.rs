//! SQLite favorites backend
//!
//! One row per favorite, keyed by `(photo_id, source)`. Each mutation is a
//! single statement, so SQLite's own atomicity gives all-or-nothing writes.

use crate::config::storage::SCHEMA_VERSION;
use crate::data::storage;
use crate::error::{AppError, Result};
use photos::error::PhotosError;
use photos::favorites::{FavoriteRecord, FavoritesRepository};
use photos::model::{PhotoKey, PhotoSource};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Initialize the favorites schema
fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    let current_version: i32 = conn
        .query_row(
            "SELECT version FROM schema_version ORDER BY version DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?
        .unwrap_or(0);

    if current_version < 1 {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS favorites (
                photo_id TEXT NOT NULL,
                source TEXT NOT NULL,
                preview_url TEXT,
                added_at INTEGER NOT NULL,
                seq INTEGER NOT NULL,
                PRIMARY KEY (photo_id, source)
            )",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_favorites_seq ON favorites(seq)",
            [],
        )?;
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;
    }

    Ok(())
}

fn db_error(e: rusqlite::Error) -> PhotosError {
    AppError::Database(e).into()
}

/// Favorites persisted in a SQLite database
pub struct SqliteFavoritesRepository {
    conn: Connection,
}

impl SqliteFavoritesRepository {
    /// Open (or create) a database file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                storage::create_dir_if_needed(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        init_schema(&conn)?;
        log::debug!("opened favorites database {:?}", path);
        Ok(Self { conn })
    }

    /// Volatile database, mostly for tests
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl FavoritesRepository for SqliteFavoritesRepository {
    fn insert(&mut self, record: FavoriteRecord) -> photos::error::Result<bool> {
        let inserted = self
            .conn
            .execute(
                "INSERT OR IGNORE INTO favorites (photo_id, source, preview_url, added_at, seq)
                 VALUES (?1, ?2, ?3, ?4, (SELECT COALESCE(MAX(seq), 0) + 1 FROM favorites))",
                params![
                    record.id,
                    record.source.as_str(),
                    record.preview_url,
                    record.added_at as i64,
                ],
            )
            .map_err(db_error)?;
        Ok(inserted > 0)
    }

    fn delete(&mut self, key: &PhotoKey) -> photos::error::Result<bool> {
        let deleted = self
            .conn
            .execute(
                "DELETE FROM favorites WHERE photo_id = ?1 AND source = ?2",
                params![key.id, key.source.as_str()],
            )
            .map_err(db_error)?;
        Ok(deleted > 0)
    }

    fn contains(&self, key: &PhotoKey) -> photos::error::Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM favorites WHERE photo_id = ?1 AND source = ?2",
                params![key.id, key.source.as_str()],
                |_| Ok(()),
            )
            .optional()
            .map_err(db_error)?;
        Ok(found.is_some())
    }

    fn list(&self) -> photos::error::Result<Vec<FavoriteRecord>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT photo_id, source, preview_url, added_at, seq
                 FROM favorites ORDER BY seq ASC",
            )
            .map_err(db_error)?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, i64>(3)?,
                    row.get::<_, i64>(4)?,
                ))
            })
            .map_err(db_error)?;

        let mut records = Vec::new();
        for row in rows {
            let (id, source, preview_url, added_at, seq) = row.map_err(db_error)?;
            records.push(FavoriteRecord {
                id,
                source: source.parse::<PhotoSource>()?,
                preview_url,
                added_at: added_at.max(0) as u64,
                seq: seq.max(0) as u64,
            });
        }
        Ok(records)
    }

    fn clear(&mut self) -> photos::error::Result<usize> {
        self.conn
            .execute("DELETE FROM favorites", [])
            .map_err(db_error)
    }

    fn count(&self) -> photos::error::Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM favorites", [], |row| row.get(0))
            .map_err(db_error)?;
        Ok(count.max(0) as usize)
    }
}
