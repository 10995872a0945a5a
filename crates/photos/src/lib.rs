//! Photos — favorites core
//!
//! Photo model, the persistent favorites store and the notification bus
//! that keeps every screen consistent when a favorite is toggled.
//!
//! ## Quick start
//!
//! ```
//! use photos::favorites::{FavoritesStore, MemoryRepository};
//! use photos::model::{Photo, PhotoSource};
//!
//! let store = FavoritesStore::new(MemoryRepository::new());
//! let photo = Photo::new("p1", PhotoSource::Pexels);
//! assert!(store.invert_favorite(&photo).unwrap());
//! assert!(store.is_favorite(&photo).unwrap());
//! ```

pub mod config;
pub mod error;
pub mod favorites;
pub mod model;
