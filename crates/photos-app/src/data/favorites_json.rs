//! JSON-file favorites backend
//!
//! Keeps the records in memory and writes the whole file through on every
//! mutation. The in-memory copy is only replaced once the write succeeded.

use crate::config::storage::FAVORITES_VERSION;
use crate::data::storage;
use crate::error::{AppError, Result};
use photos::favorites::{FavoriteRecord, FavoritesRepository, MemoryRepository};
use photos::model::PhotoKey;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Favorites file structure
#[derive(Debug, Serialize, Deserialize)]
struct FavoritesFile {
    version: u32,
    #[serde(default)]
    next_seq: u64,
    #[serde(default)]
    favorites: Vec<FavoriteRecord>,
}

/// Favorites persisted as a versioned JSON document
pub struct JsonFavoritesRepository {
    path: PathBuf,
    records: MemoryRepository,
}

impl JsonFavoritesRepository {
    /// Open (or start) a favorites file at a specific path
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = match storage::load_from::<FavoritesFile>(&path)? {
            Some(file) => {
                if file.version > FAVORITES_VERSION {
                    return Err(AppError::Config(format!(
                        "{:?} has format version {}, newest supported is {}",
                        path, file.version, FAVORITES_VERSION
                    )));
                }
                // Keep sequence numbers monotonic across deletes of the newest record
                MemoryRepository::from_records(file.favorites).with_next_seq(file.next_seq)
            }
            None => MemoryRepository::new(),
        };

        log::debug!("opened favorites file {:?}", path);
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply a mutation to a copy, persist it, then commit
    fn commit<T>(
        &mut self,
        mutate: impl FnOnce(&mut MemoryRepository) -> photos::error::Result<T>,
    ) -> photos::error::Result<T> {
        let mut next = self.records.clone();
        let outcome = mutate(&mut next)?;

        let file = FavoritesFile {
            version: FAVORITES_VERSION,
            next_seq: next.next_seq(),
            favorites: next.list()?,
        };
        storage::save_to(&self.path, &file)?;

        self.records = next;
        Ok(outcome)
    }
}

impl FavoritesRepository for JsonFavoritesRepository {
    fn insert(&mut self, record: FavoriteRecord) -> photos::error::Result<bool> {
        if self.records.contains(&record.key())? {
            return Ok(false);
        }
        self.commit(|records| records.insert(record))
    }

    fn delete(&mut self, key: &PhotoKey) -> photos::error::Result<bool> {
        if !self.records.contains(key)? {
            return Ok(false);
        }
        self.commit(|records| records.delete(key))
    }

    fn contains(&self, key: &PhotoKey) -> photos::error::Result<bool> {
        self.records.contains(key)
    }

    fn list(&self) -> photos::error::Result<Vec<FavoriteRecord>> {
        self.records.list()
    }

    fn clear(&mut self) -> photos::error::Result<usize> {
        self.commit(|records| records.clear())
    }

    fn count(&self) -> photos::error::Result<usize> {
        self.records.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photos::favorites::FavoritesStore;
    use photos::model::{Photo, PhotoSource, PhotoUrls};
    use std::env::temp_dir;
    use std::fs;
    use std::sync::atomic::{AtomicU32, Ordering};

    static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

    fn temp_path() -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        temp_dir().join(format!("photos_fav_json_test_{}_{}.json", std::process::id(), id))
    }

    fn photo(id: &str) -> Photo {
        Photo::new(id, PhotoSource::Pexels)
            .with_urls(PhotoUrls::preview_only(format!("https://img/{}.jpg", id)))
    }

    #[test]
    fn test_open_nonexistent_is_empty() {
        let path = temp_path();
        let repo = JsonFavoritesRepository::open(&path).unwrap();
        assert_eq!(repo.count().unwrap(), 0);
        assert!(!path.exists());
    }

    #[test]
    fn test_insert_writes_through() {
        let path = temp_path();
        let mut repo = JsonFavoritesRepository::open(&path).unwrap();

        assert!(repo.insert(FavoriteRecord::from_photo(&photo("a"))).unwrap());
        assert!(path.exists());

        // Duplicate insert does not rewrite or duplicate
        assert!(!repo.insert(FavoriteRecord::from_photo(&photo("a"))).unwrap());
        assert_eq!(repo.count().unwrap(), 1);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_reopen_preserves_membership_and_order() {
        let path = temp_path();

        {
            let store = FavoritesStore::new(JsonFavoritesRepository::open(&path).unwrap());
            store.set_favorite(&photo("b"), true).unwrap();
            store.set_favorite(&photo("a"), true).unwrap();
            store.set_favorite(&photo("c"), true).unwrap();
            store.set_favorite(&photo("c"), false).unwrap();
        }

        {
            let store = FavoritesStore::new(JsonFavoritesRepository::open(&path).unwrap());
            assert!(store.is_favorite(&photo("a")).unwrap());
            assert!(!store.is_favorite(&photo("c")).unwrap());

            let favorites = store.list_favorites().unwrap();
            let ids: Vec<_> = favorites.iter().map(|p| p.id.as_str()).collect();
            assert_eq!(ids, vec!["b", "a"]);
            assert_eq!(favorites[0].preview_url(), Some("https://img/b.jpg"));

            // "c" was the newest; a new favorite still sorts after "a"
            store.set_favorite(&photo("d"), true).unwrap();
            let last = store.list_favorites().unwrap().pop().unwrap();
            assert_eq!(last.id, "d");
        }

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_clear_persists() {
        let path = temp_path();
        let mut repo = JsonFavoritesRepository::open(&path).unwrap();
        repo.insert(FavoriteRecord::from_photo(&photo("a"))).unwrap();
        repo.insert(FavoriteRecord::from_photo(&photo("b"))).unwrap();
        assert_eq!(repo.clear().unwrap(), 2);

        let reopened = JsonFavoritesRepository::open(&path).unwrap();
        assert_eq!(reopened.count().unwrap(), 0);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_failed_write_leaves_state_untouched() {
        let root = temp_path().with_extension("d");
        // A directory squatting on the temp file name makes every write fail
        fs::create_dir_all(root.join("favorites.tmp")).unwrap();

        let mut repo = JsonFavoritesRepository::open(root.join("favorites.json")).unwrap();
        let result = repo.insert(FavoriteRecord::from_photo(&photo("a")));

        assert!(result.is_err());
        assert!(!repo.contains(&photo("a").key()).unwrap());
        assert_eq!(repo.count().unwrap(), 0);
        assert!(!root.join("favorites.json").exists());

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = temp_path();
        fs::write(&path, "{ definitely not json").unwrap();
        assert!(JsonFavoritesRepository::open(&path).is_err());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let path = temp_path();
        fs::write(&path, r#"{"version": 99, "favorites": []}"#).unwrap();

        let err = JsonFavoritesRepository::open(&path).err().unwrap();
        assert!(matches!(err, AppError::Config(_)));

        let _ = fs::remove_file(&path);
    }
}
