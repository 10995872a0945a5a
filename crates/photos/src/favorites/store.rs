//! Favorites store
//!
//! Single source of truth for favorite status. Mutations are persisted
//! through the repository first and only then published on the bus.

use super::bus::{FavoritesBus, FavoritesListener, Subscription};
use super::repository::{FavoriteRecord, FavoritesRepository};
use crate::error::Result;
use crate::model::{Photo, PhotoKey};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// Persistent favorite set with change notification
///
/// Shared between screens behind an `Arc`. Each mutating call takes the
/// repository lock once for its whole read-modify-write, then notifies with
/// no lock held, so listeners may call back into the store.
pub struct FavoritesStore {
    repo: Mutex<Box<dyn FavoritesRepository>>,
    bus: FavoritesBus,
}

impl FavoritesStore {
    /// Create a store over a repository with a fresh bus
    pub fn new<R: FavoritesRepository + 'static>(repo: R) -> Self {
        Self::with_bus(repo, FavoritesBus::new())
    }

    /// Create a store publishing on an existing bus
    pub fn with_bus<R: FavoritesRepository + 'static>(repo: R, bus: FavoritesBus) -> Self {
        Self {
            repo: Mutex::new(Box::new(repo)),
            bus,
        }
    }

    /// The bus this store publishes on
    pub fn bus(&self) -> &FavoritesBus {
        &self.bus
    }

    /// Shorthand for `bus().subscribe(listener)`
    pub fn subscribe<L>(&self, listener: &Arc<L>) -> Subscription
    where
        L: FavoritesListener + 'static,
    {
        self.bus.subscribe(listener)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Membership by (id, source)
    pub fn is_favorite(&self, photo: &Photo) -> Result<bool> {
        self.is_favorite_key(&photo.key())
    }

    pub fn is_favorite_key(&self, key: &PhotoKey) -> Result<bool> {
        self.repo().contains(key)
    }

    /// All favorites as partial photos, oldest first
    pub fn list_favorites(&self) -> Result<Vec<Photo>> {
        Ok(self.repo().list()?.iter().map(FavoriteRecord::to_photo).collect())
    }

    /// Every favorite key in one read (for binding a page of rows)
    pub fn favorite_keys(&self) -> Result<HashSet<PhotoKey>> {
        Ok(self.repo().list()?.iter().map(FavoriteRecord::key).collect())
    }

    pub fn count(&self) -> Result<usize> {
        self.repo().count()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Persist the requested state and notify once
    pub fn set_favorite(&self, photo: &Photo, favorite: bool) -> Result<()> {
        {
            let mut repo = self.repo();
            Self::write(&mut **repo, photo, favorite)
                .inspect_err(|e| log::warn!("set_favorite {} failed: {}", photo.key(), e))?;
        }

        log::debug!("favorite {} set to {}", photo.key(), favorite);
        self.bus.publish_change(photo, favorite);
        Ok(())
    }

    /// Flip the current state; returns the new state
    pub fn invert_favorite(&self, photo: &Photo) -> Result<bool> {
        let key = photo.key();
        let favorite = {
            let mut repo = self.repo();
            let favorite = !repo.contains(&key)?;
            Self::write(&mut **repo, photo, favorite)
                .inspect_err(|e| log::warn!("invert_favorite {} failed: {}", key, e))?;
            favorite
        };

        log::debug!("favorite {} inverted to {}", key, favorite);
        self.bus.publish_change(photo, favorite);
        Ok(favorite)
    }

    /// Remove every favorite; only the bulk event is published
    pub fn clear(&self) -> Result<usize> {
        let removed = self
            .repo()
            .clear()
            .inspect_err(|e| log::warn!("clearing favorites failed: {}", e))?;

        log::debug!("cleared {} favorites", removed);
        self.bus.publish_bulk();
        Ok(removed)
    }

    fn write(repo: &mut dyn FavoritesRepository, photo: &Photo, favorite: bool) -> Result<()> {
        if favorite {
            repo.insert(FavoriteRecord::from_photo(photo))?;
        } else {
            repo.delete(&photo.key())?;
        }
        Ok(())
    }

    fn repo(&self) -> MutexGuard<'_, Box<dyn FavoritesRepository>> {
        self.repo.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PhotosError;
    use crate::favorites::event::{Event, EventCell};
    use crate::favorites::repository::MemoryRepository;
    use crate::favorites::FavoriteChange;
    use crate::model::PhotoSource;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn photo(id: &str) -> Photo {
        Photo::new(id, PhotoSource::Pexels)
    }

    fn store() -> FavoritesStore {
        FavoritesStore::new(MemoryRepository::new())
    }

    /// Counts raw deliveries and handled payloads separately
    #[derive(Default)]
    struct Counter {
        changes: AtomicUsize,
        bulk: AtomicUsize,
        last: Mutex<Option<FavoriteChange>>,
    }

    impl FavoritesListener for Counter {
        fn on_favorite_changed(&self, mut change: Event<FavoriteChange>) {
            if let Some(change) = change.take() {
                self.changes.fetch_add(1, Ordering::SeqCst);
                *self.last.lock().unwrap() = Some(change);
            }
        }

        fn on_favorites_changed(&self, mut event: Event<()>) {
            if event.take().is_some() {
                self.bulk.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    impl Counter {
        fn counts(&self) -> (usize, usize) {
            (
                self.changes.load(Ordering::SeqCst),
                self.bulk.load(Ordering::SeqCst),
            )
        }
    }

    /// Repository whose every call fails
    struct BrokenRepository;

    impl FavoritesRepository for BrokenRepository {
        fn insert(&mut self, _record: FavoriteRecord) -> Result<bool> {
            Err(PhotosError::Storage("disk full".to_string()))
        }

        fn delete(&mut self, _key: &PhotoKey) -> Result<bool> {
            Err(PhotosError::Storage("disk full".to_string()))
        }

        fn contains(&self, _key: &PhotoKey) -> Result<bool> {
            Ok(false)
        }

        fn list(&self) -> Result<Vec<FavoriteRecord>> {
            Err(PhotosError::Storage("corrupt".to_string()))
        }

        fn clear(&mut self) -> Result<usize> {
            Err(PhotosError::Storage("disk full".to_string()))
        }
    }

    #[test]
    fn test_not_favorite_initially() {
        let store = store();
        assert!(!store.is_favorite(&photo("p1")).unwrap());
        assert!(store.list_favorites().unwrap().is_empty());
    }

    #[test]
    fn test_toggle_scenario() {
        let store = store();
        let counter = Arc::new(Counter::default());
        let _sub = store.subscribe(&counter);
        let p1 = photo("p1");

        assert!(store.invert_favorite(&p1).unwrap());

        assert!(store.is_favorite(&p1).unwrap());
        let favorites = store.list_favorites().unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].key(), PhotoKey::new("p1", PhotoSource::Pexels));
        assert_eq!(counter.counts(), (1, 1));

        let last = counter.last.lock().unwrap().clone().unwrap();
        assert_eq!(last.photo, p1);
        assert!(last.favorite);
    }

    #[test]
    fn test_invert_twice_round_trips() {
        let store = store();
        let p = photo("p1");
        assert!(store.invert_favorite(&p).unwrap());
        assert!(!store.invert_favorite(&p).unwrap());
        assert!(!store.is_favorite(&p).unwrap());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_invert_notifies_once_per_call() {
        let store = store();
        let counter = Arc::new(Counter::default());
        let _sub = store.subscribe(&counter);
        let p = photo("p1");

        store.invert_favorite(&p).unwrap();
        store.invert_favorite(&p).unwrap();
        store.invert_favorite(&p).unwrap();

        assert_eq!(counter.counts(), (3, 3));
    }

    #[test]
    fn test_set_favorite_no_duplicates() {
        let store = store();
        let p = photo("p1");
        for _ in 0..3 {
            store.set_favorite(&p, true).unwrap();
        }

        let favorites = store.list_favorites().unwrap();
        assert_eq!(favorites.iter().filter(|f| **f == p).count(), 1);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_set_favorite_false() {
        let store = store();
        let p = photo("p1");
        store.set_favorite(&p, true).unwrap();
        store.set_favorite(&p, false).unwrap();
        assert!(!store.is_favorite(&p).unwrap());

        // Removing an absent favorite is fine
        store.set_favorite(&p, false).unwrap();
    }

    #[test]
    fn test_source_is_part_of_identity() {
        let store = store();
        store.set_favorite(&Photo::new("1", PhotoSource::Pexels), true).unwrap();
        assert!(!store.is_favorite(&Photo::new("1", PhotoSource::Unsplash)).unwrap());
    }

    #[test]
    fn test_favorite_keys() {
        let store = store();
        store.set_favorite(&photo("a"), true).unwrap();
        store.set_favorite(&photo("b"), true).unwrap();

        let keys = store.favorite_keys().unwrap();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&PhotoKey::new("a", PhotoSource::Pexels)));
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let store = store();
        let counter = Arc::new(Counter::default());
        let sub = store.subscribe(&counter);

        store.invert_favorite(&photo("p1")).unwrap();
        sub.cancel();
        store.invert_favorite(&photo("p1")).unwrap();

        assert_eq!(counter.counts(), (1, 1));
    }

    #[test]
    fn test_clear_publishes_bulk_only() {
        let store = store();
        store.set_favorite(&photo("a"), true).unwrap();
        store.set_favorite(&photo("b"), true).unwrap();

        let counter = Arc::new(Counter::default());
        let _sub = store.subscribe(&counter);

        assert_eq!(store.clear().unwrap(), 2);
        assert_eq!(store.count().unwrap(), 0);
        assert_eq!(counter.counts(), (0, 1));
    }

    #[test]
    fn test_failed_write_surfaces_error_without_notification() {
        let store = FavoritesStore::new(BrokenRepository);
        let counter = Arc::new(Counter::default());
        let _sub = store.subscribe(&counter);
        let p = photo("p1");

        let err = store.invert_favorite(&p).unwrap_err();
        assert!(matches!(err, PhotosError::Storage(_)));
        assert!(store.set_favorite(&p, false).is_err());
        assert!(store.clear().is_err());
        assert!(store.list_favorites().is_err());

        assert_eq!(counter.counts(), (0, 0));
    }

    /// Observer that parks events the way a screen's view model does
    #[derive(Default)]
    struct Screen {
        favorite: EventCell<bool>,
        handled: AtomicUsize,
    }

    impl FavoritesListener for Screen {
        fn on_favorite_changed(&self, mut change: Event<FavoriteChange>) {
            if let Some(change) = change.take() {
                self.favorite.set(change.favorite);
            }
        }
    }

    impl Screen {
        fn render(&self) {
            if self.favorite.take().is_some() {
                self.handled.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_event_handled_once_per_observer() {
        let store = store();
        let screen = Arc::new(Screen::default());
        let other = Arc::new(Screen::default());
        let _s1 = store.subscribe(&screen);
        let _s2 = store.subscribe(&other);

        store.invert_favorite(&photo("p1")).unwrap();

        screen.render();
        // Rotation: the same observer renders again
        screen.render();
        assert_eq!(screen.handled.load(Ordering::SeqCst), 1);

        // Another observer still gets its own copy
        other.render();
        assert_eq!(other.handled.load(Ordering::SeqCst), 1);
    }

    /// Reads the store from inside the callback
    struct Reentrant {
        store: Mutex<Option<Arc<FavoritesStore>>>,
        seen: Mutex<Vec<bool>>,
    }

    impl FavoritesListener for Reentrant {
        fn on_favorite_changed(&self, mut change: Event<FavoriteChange>) {
            let Some(change) = change.take() else { return };
            if let Some(store) = self.store.lock().unwrap().as_ref() {
                let now = store.is_favorite(&change.photo).unwrap();
                self.seen.lock().unwrap().push(now);
            }
        }
    }

    #[test]
    fn test_listener_can_reenter_store() {
        let store = Arc::new(store());
        let listener = Arc::new(Reentrant {
            store: Mutex::new(Some(store.clone())),
            seen: Mutex::new(Vec::new()),
        });
        let _sub = store.subscribe(&listener);

        store.invert_favorite(&photo("p1")).unwrap();
        store.invert_favorite(&photo("p1")).unwrap();

        // Notification happens after the write is visible
        assert_eq!(*listener.seen.lock().unwrap(), vec![true, false]);

        listener.store.lock().unwrap().take();
    }

    #[test]
    fn test_store_is_shareable_across_threads() {
        let store = Arc::new(store());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store.set_favorite(&photo(&format!("t{}", i)), true).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.count().unwrap(), 4);
    }
}
