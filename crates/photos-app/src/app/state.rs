//! Shared application state and commands
//!
//! `AppCommand` is what any frontend sends to the controller.
//! `AppSnapshot` is the state the controller publishes back.

use std::borrow::Cow;

use photos::model::Photo;

/// Commands sent by any frontend
#[derive(Debug, Clone)]
pub enum AppCommand {
    // Favorites
    InvertFavorite(Photo),
    SetFavorite(Photo, bool),
    ClearFavorites,

    // Stop the controller loop
    Shutdown,
}

/// Snapshot of app state, shared between the controller and frontends
#[derive(Clone, Debug)]
pub struct AppSnapshot {
    pub favorites_count: usize,
    /// Last failed command, cleared by the next success
    pub last_error: Option<String>,
    pub status_text: Cow<'static, str>,
    /// Commands processed so far
    pub handled: u64,
}

impl AppSnapshot {
    pub fn is_error(&self) -> bool {
        self.last_error.is_some()
    }
}

impl Default for AppSnapshot {
    fn default() -> Self {
        Self {
            favorites_count: 0,
            last_error: None,
            status_text: Cow::Borrowed("Ready"),
            handled: 0,
        }
    }
}
