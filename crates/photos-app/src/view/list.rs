//! List screen state
//!
//! Holds the photos currently shown and turns bus events into row-level
//! redraw requests. The favorite bit of a row always comes from the store.

use super::layout::LayoutType;
use crate::error::Result;
use photos::favorites::{
    Event, EventCell, FavoriteChange, FavoritesListener, FavoritesStore, Subscription,
};
use photos::model::{Photo, PhotoKey};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

/// One bound row of the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRow {
    pub index: usize,
    pub photo: Photo,
    pub favorite: bool,
}

#[derive(Default)]
struct Snapshot {
    photos: Vec<Photo>,
    positions: HashMap<PhotoKey, usize>,
}

/// Listener side of the model, registered on the bus
#[derive(Default)]
struct ListState {
    snapshot: Mutex<Snapshot>,
    row_updates: Mutex<BTreeSet<usize>>,
    invalidate: EventCell<()>,
}

impl ListState {
    fn snapshot(&self) -> MutexGuard<'_, Snapshot> {
        self.snapshot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl FavoritesListener for ListState {
    fn on_favorite_changed(&self, mut change: Event<FavoriteChange>) {
        let Some(change) = change.take() else {
            return;
        };
        let index = self.snapshot().positions.get(&change.photo.key()).copied();
        if let Some(index) = index {
            self.row_updates
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .insert(index);
        }
    }

    fn on_favorites_changed(&self, mut event: Event<()>) {
        // Membership may have changed outside the snapshot (favorites listing)
        if event.take().is_some() {
            self.invalidate.set(());
        }
    }
}

/// View state of a photo list screen
pub struct PhotoListModel {
    store: Arc<FavoritesStore>,
    state: Arc<ListState>,
    layout: Mutex<LayoutType>,
    _subscription: Subscription,
}

impl PhotoListModel {
    pub fn new(store: Arc<FavoritesStore>, layout: LayoutType) -> Self {
        let state = Arc::new(ListState::default());
        let subscription = store.subscribe(&state);
        Self {
            store,
            state,
            layout: Mutex::new(layout),
            _subscription: subscription,
        }
    }

    /// Replace the photos shown; pending row updates refer to the old rows
    /// and are dropped
    pub fn submit(&self, photos: &[Photo]) {
        {
            let mut snapshot = self.state.snapshot();
            snapshot.photos = photos.to_vec();
            snapshot.positions = photos
                .iter()
                .enumerate()
                .map(|(index, photo)| (photo.key(), index))
                .collect();
        }
        self.state
            .row_updates
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
        self.state.invalidate.set(());
    }

    pub fn len(&self) -> usize {
        self.state.snapshot().photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn layout(&self) -> LayoutType {
        *self.layout.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn span_count(&self) -> u32 {
        self.layout().span_count()
    }

    /// Switch list/grid; the whole list needs a redraw
    pub fn toggle_layout(&self) -> LayoutType {
        let layout = {
            let mut layout = self.layout.lock().unwrap_or_else(|e| e.into_inner());
            *layout = layout.toggled();
            *layout
        };
        self.state.invalidate.set(());
        layout
    }

    // =========================================================================
    // Pending redraws
    // =========================================================================

    /// Rows to rebind, ascending; each is returned once
    pub fn take_row_updates(&self) -> Vec<usize> {
        std::mem::take(&mut *self.state.row_updates.lock().unwrap_or_else(|e| e.into_inner()))
            .into_iter()
            .collect()
    }

    /// Whether the whole list must be rebound; consumed on read
    pub fn take_invalidate(&self) -> bool {
        self.state.invalidate.take().is_some()
    }

    // =========================================================================
    // Binding
    // =========================================================================

    /// Bind one row, `None` when out of range
    pub fn bind_row(&self, index: usize) -> Result<Option<PhotoRow>> {
        let photo = match self.state.snapshot().photos.get(index) {
            Some(photo) => photo.clone(),
            None => return Ok(None),
        };
        let favorite = self.store.is_favorite(&photo)?;
        Ok(Some(PhotoRow {
            index,
            photo,
            favorite,
        }))
    }

    /// Bind every row with a single store read
    pub fn bind_all(&self) -> Result<Vec<PhotoRow>> {
        let favorites = self.store.favorite_keys()?;
        let snapshot = self.state.snapshot();
        Ok(snapshot
            .photos
            .iter()
            .enumerate()
            .map(|(index, photo)| PhotoRow {
                index,
                favorite: favorites.contains(&photo.key()),
                photo: photo.clone(),
            })
            .collect())
    }

    /// Flip the favorite of a row; returns the new state
    pub fn invert_favorite(&self, index: usize) -> Result<Option<bool>> {
        let photo = self.state.snapshot().photos.get(index).cloned();
        match photo {
            Some(photo) => Ok(Some(self.store.invert_favorite(&photo)?)),
            None => Ok(None),
        }
    }
}
