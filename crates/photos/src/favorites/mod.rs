//! Favorites
//!
//! Persistent favorite set plus the notification bus that fans changes out
//! to every subscribed screen.

pub mod bus;
pub mod event;
pub mod repository;
pub mod store;

// Re-exports
pub use bus::{FavoriteChange, FavoritesBus, FavoritesListener, Subscription};
pub use event::{Event, EventCell};
pub use repository::{FavoriteRecord, FavoritesRepository, MemoryRepository};
pub use store::FavoritesStore;
