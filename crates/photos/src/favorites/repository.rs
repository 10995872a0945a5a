//! Persistence collaborator for the favorites store
//!
//! The store needs key-based insert, delete, existence check and full
//! enumeration. Anything that can do those four things can back it.

use crate::error::Result;
use crate::model::{Photo, PhotoKey, PhotoSource};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::time::{SystemTime, UNIX_EPOCH};

/// A persisted favorite marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    /// Provider-specific photo ID
    pub id: String,
    /// Provider the photo came from
    pub source: PhotoSource,
    /// Thumbnail for the favorites listing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    /// When the favorite was added (Unix timestamp)
    pub added_at: u64,
    /// Insertion sequence, assigned by the repository
    #[serde(default)]
    pub seq: u64,
}

impl FavoriteRecord {
    /// Build a record for a photo being favorited now
    pub fn from_photo(photo: &Photo) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        Self {
            id: photo.id.clone(),
            source: photo.source,
            preview_url: photo.preview_url().map(String::from),
            added_at: now,
            seq: 0,
        }
    }

    pub fn key(&self) -> PhotoKey {
        PhotoKey::new(self.id.clone(), self.source)
    }

    /// Partial photo for listing screens
    pub fn to_photo(&self) -> Photo {
        Photo::from_key(self.key(), self.preview_url.clone())
    }
}

/// Key-based storage of favorite records
///
/// Every mutating call must be all-or-nothing: on `Err` the repository is
/// left exactly as it was.
pub trait FavoritesRepository: Send {
    /// Insert a record; `Ok(false)` if the key was already present
    fn insert(&mut self, record: FavoriteRecord) -> Result<bool>;

    /// Delete by key; `Ok(false)` if nothing was stored
    fn delete(&mut self, key: &PhotoKey) -> Result<bool>;

    /// Check membership
    fn contains(&self, key: &PhotoKey) -> Result<bool>;

    /// All records, oldest insertion first
    fn list(&self) -> Result<Vec<FavoriteRecord>>;

    /// Remove every record, returning how many were removed
    fn clear(&mut self) -> Result<usize>;

    /// Number of records
    fn count(&self) -> Result<usize> {
        Ok(self.list()?.len())
    }
}

impl<R: FavoritesRepository + ?Sized> FavoritesRepository for Box<R> {
    fn insert(&mut self, record: FavoriteRecord) -> Result<bool> {
        (**self).insert(record)
    }

    fn delete(&mut self, key: &PhotoKey) -> Result<bool> {
        (**self).delete(key)
    }

    fn contains(&self, key: &PhotoKey) -> Result<bool> {
        (**self).contains(key)
    }

    fn list(&self) -> Result<Vec<FavoriteRecord>> {
        (**self).list()
    }

    fn clear(&mut self) -> Result<usize> {
        (**self).clear()
    }

    fn count(&self) -> Result<usize> {
        (**self).count()
    }
}

/// Volatile repository
///
/// Records are ordered by insertion sequence; the key index makes
/// membership checks O(1).
#[derive(Debug, Default, Clone)]
pub struct MemoryRepository {
    records: BTreeMap<u64, FavoriteRecord>,
    index: HashMap<PhotoKey, u64>,
    next_seq: u64,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing records (sequence numbers are kept)
    pub fn from_records(records: impl IntoIterator<Item = FavoriteRecord>) -> Self {
        let mut repo = Self::new();
        for record in records {
            if repo.index.contains_key(&record.key()) {
                continue;
            }
            repo.next_seq = repo.next_seq.max(record.seq + 1);
            repo.index.insert(record.key(), record.seq);
            repo.records.insert(record.seq, record);
        }
        repo
    }

    /// Sequence number the next insert will get
    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    /// Never hand out sequence numbers below `next_seq`
    pub fn with_next_seq(mut self, next_seq: u64) -> Self {
        self.next_seq = self.next_seq.max(next_seq);
        self
    }
}

impl FavoritesRepository for MemoryRepository {
    fn insert(&mut self, mut record: FavoriteRecord) -> Result<bool> {
        let key = record.key();
        if self.index.contains_key(&key) {
            return Ok(false);
        }
        // Sequence numbers from a seeded set may collide with the counter
        while self.records.contains_key(&self.next_seq) {
            self.next_seq += 1;
        }
        record.seq = self.next_seq;
        self.next_seq += 1;
        self.index.insert(key, record.seq);
        self.records.insert(record.seq, record);
        Ok(true)
    }

    fn delete(&mut self, key: &PhotoKey) -> Result<bool> {
        match self.index.remove(key) {
            Some(seq) => {
                self.records.remove(&seq);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn contains(&self, key: &PhotoKey) -> Result<bool> {
        Ok(self.index.contains_key(key))
    }

    fn list(&self) -> Result<Vec<FavoriteRecord>> {
        Ok(self.records.values().cloned().collect())
    }

    fn clear(&mut self) -> Result<usize> {
        let removed = self.records.len();
        self.records.clear();
        self.index.clear();
        Ok(removed)
    }

    fn count(&self) -> Result<usize> {
        Ok(self.records.len())
    }
}
