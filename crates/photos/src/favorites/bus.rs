//! Favorites notification bus
//!
//! In-process fan-out from the store to UI observers. The bus only keeps a
//! `Weak` reference to each listener; the returned [`Subscription`] removes
//! the registration when dropped.

use super::event::Event;
use crate::model::Photo;
use std::sync::{Arc, Mutex, Weak};

/// Per-photo notification payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteChange {
    pub photo: Photo,
    /// New favorite state
    pub favorite: bool,
}

/// Observer of favorite changes
///
/// Both callbacks run synchronously on the thread that mutated the store,
/// after the write completed and with no lock held. Each listener gets its
/// own `Event`, so consuming it never affects other listeners.
pub trait FavoritesListener: Send + Sync {
    /// A single photo changed state (detail screens update one icon)
    fn on_favorite_changed(&self, _change: Event<FavoriteChange>) {}

    /// Something in the favorite set changed (list screens redraw)
    fn on_favorites_changed(&self, _event: Event<()>) {}
}

struct Registration {
    id: u64,
    listener: Weak<dyn FavoritesListener>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Registration>,
}

impl Registry {
    fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|r| r.id == id)
    }

    fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|r| r.id != id);
        self.entries.len() != before
    }
}

/// Publish/subscribe hub for favorite changes
///
/// Cloning yields another handle to the same set of listeners.
#[derive(Clone, Default)]
pub struct FavoritesBus {
    registry: Arc<Mutex<Registry>>,
}

impl FavoritesBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener
    ///
    /// The bus does not keep the listener alive. Delivery stops when the
    /// subscription is dropped or when the last `Arc` to the listener goes.
    pub fn subscribe<L>(&self, listener: &Arc<L>) -> Subscription
    where
        L: FavoritesListener + 'static,
    {
        let weak: Weak<dyn FavoritesListener> = Arc::downgrade(listener) as Weak<L>;
        let mut registry = self.lock();
        registry.next_id += 1;
        let id = registry.next_id;
        registry.entries.push(Registration { id, listener: weak });
        log::debug!("favorites listener {} subscribed", id);

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Number of live registrations
    pub fn listener_count(&self) -> usize {
        self.lock()
            .entries
            .iter()
            .filter(|r| r.listener.strong_count() > 0)
            .count()
    }

    /// Deliver a per-photo event followed by the bulk event
    pub fn publish_change(&self, photo: &Photo, favorite: bool) {
        let change = FavoriteChange {
            photo: photo.clone(),
            favorite,
        };
        self.dispatch(Some(&change));
    }

    /// Deliver only the bulk event
    pub fn publish_bulk(&self) {
        self.dispatch(None);
    }

    fn dispatch(&self, change: Option<&FavoriteChange>) {
        for (id, listener) in self.snapshot() {
            // A callback earlier in this round may have cancelled this one
            if !self.lock().contains(id) {
                continue;
            }
            if let Some(change) = change {
                listener.on_favorite_changed(Event::new(change.clone()));
            }
            if !self.lock().contains(id) {
                continue;
            }
            listener.on_favorites_changed(Event::new(()));
        }
    }

    /// Upgrade every registration, pruning the dead ones
    fn snapshot(&self) -> Vec<(u64, Arc<dyn FavoritesListener>)> {
        let mut registry = self.lock();
        let mut live = Vec::with_capacity(registry.entries.len());
        registry.entries.retain(|r| match r.listener.upgrade() {
            Some(listener) => {
                live.push((r.id, listener));
                true
            }
            None => {
                log::warn!("favorites listener {} dropped without unsubscribing", r.id);
                false
            }
        });
        live
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Registration handle returned by [`FavoritesBus::subscribe`]
///
/// Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Unsubscribe now
    pub fn cancel(self) {
        drop(self);
    }

    /// Whether the registration is still held by a live bus
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|r| r.lock().unwrap_or_else(|e| e.into_inner()).contains(self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if registry.lock().unwrap_or_else(|e| e.into_inner()).remove(self.id) {
                log::debug!("favorites listener {} unsubscribed", self.id);
            }
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
