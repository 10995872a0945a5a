//! Photos App Services
//!
//! Favorites persistence backends, settings, paged list loading, screen
//! view state and the command controller.
//! Depends on the `photos` core crate.

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod paging;
pub mod view;
