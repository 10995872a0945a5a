//! Detail screen state

use crate::error::Result;
use photos::favorites::{
    Event, EventCell, FavoriteChange, FavoritesListener, FavoritesStore, Subscription,
};
use photos::model::{Photo, PhotoKey};
use std::fmt;
use std::sync::{Arc, Mutex};

/// Where a photo can be applied as wallpaper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallpaperTarget {
    Home,
    Lock,
    Both,
}

impl WallpaperTarget {
    pub const ALL: [WallpaperTarget; 3] = [
        WallpaperTarget::Home,
        WallpaperTarget::Lock,
        WallpaperTarget::Both,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WallpaperTarget::Home => "Home screen",
            WallpaperTarget::Lock => "Lock screen",
            WallpaperTarget::Both => "Home and lock screens",
        }
    }
}

impl fmt::Display for WallpaperTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

struct DetailState {
    store: Arc<FavoritesStore>,
    key: PhotoKey,
    favorite: Mutex<bool>,
    changed: EventCell<bool>,
}

impl DetailState {
    fn update(&self, favorite: bool, always: bool) {
        let mut current = self.favorite.lock().unwrap_or_else(|e| e.into_inner());
        if always || *current != favorite {
            *current = favorite;
            self.changed.set(favorite);
        }
    }
}

impl FavoritesListener for DetailState {
    fn on_favorite_changed(&self, mut change: Event<FavoriteChange>) {
        if change.peek().is_some_and(|c| c.photo.key() == self.key) {
            if let Some(change) = change.take() {
                self.update(change.favorite, true);
            }
        }
    }

    fn on_favorites_changed(&self, mut event: Event<()>) {
        if event.take().is_none() {
            return;
        }
        // Bulk changes (clear) carry no photo; re-read our own state
        match self.store.is_favorite_key(&self.key) {
            Ok(favorite) => self.update(favorite, false),
            Err(e) => log::warn!("detail {}: could not refresh favorite: {}", self.key, e),
        }
    }
}

/// View state of the photo detail screen
pub struct PhotoDetailModel {
    photo: Photo,
    state: Arc<DetailState>,
    favorite_init: EventCell<bool>,
    _subscription: Subscription,
}

impl PhotoDetailModel {
    /// Query the initial state and start listening
    pub fn new(store: Arc<FavoritesStore>, photo: Photo) -> Result<Self> {
        let favorite = store.is_favorite(&photo)?;
        let state = Arc::new(DetailState {
            key: photo.key(),
            favorite: Mutex::new(favorite),
            changed: EventCell::new(),
            store: store.clone(),
        });
        let subscription = store.subscribe(&state);

        let favorite_init = EventCell::new();
        favorite_init.set(favorite);

        Ok(Self {
            photo,
            state,
            favorite_init,
            _subscription: subscription,
        })
    }

    pub fn photo(&self) -> &Photo {
        &self.photo
    }

    /// Last known favorite state
    pub fn is_favorite(&self) -> bool {
        *self.state.favorite.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Initial state, handed out once
    pub fn take_favorite_init(&self) -> Option<bool> {
        self.favorite_init.take()
    }

    /// Latest change of this photo, handed out once
    pub fn take_favorite_changed(&self) -> Option<bool> {
        self.state.changed.take()
    }

    /// Flip the favorite; the new state also arrives as a change event
    pub fn invert_favorite(&self) -> Result<bool> {
        Ok(self.state.store.invert_favorite(&self.photo)?)
    }

    pub fn share_text(&self) -> String {
        self.photo.share_text()
    }

    /// Targets offered by the set-wallpaper dialog
    pub fn wallpaper_options(&self) -> &'static [WallpaperTarget] {
        &WallpaperTarget::ALL
    }
}
