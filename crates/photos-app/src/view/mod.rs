//! Screen view state
//!
//! Framework-free models for the list and detail screens. They observe the
//! favorites bus and park what the screen has to redraw.

pub mod detail;
pub mod layout;
pub mod list;

pub use detail::{PhotoDetailModel, WallpaperTarget};
pub use layout::LayoutType;
pub use list::{PhotoListModel, PhotoRow};
