//! Paging data types

use photos::model::Photo;

/// One page returned by a feed
#[derive(Debug, Clone, Default)]
pub struct FeedPage {
    pub photos: Vec<Photo>,
    /// Key of the following page, `None` at the end
    pub next_page: Option<u32>,
}

impl FeedPage {
    pub fn new(photos: Vec<Photo>, next_page: Option<u32>) -> Self {
        Self { photos, next_page }
    }

    /// Final page
    pub fn last(photos: Vec<Photo>) -> Self {
        Self::new(photos, None)
    }
}

/// Load status of a paged list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    NotLoading { end_reached: bool },
    Loading,
    Error(String),
}

impl LoadState {
    pub fn is_end_reached(&self) -> bool {
        matches!(self, LoadState::NotLoading { end_reached: true })
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// Error message, if the last load failed
    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Error(message) => Some(message),
            _ => None,
        }
    }
}

impl Default for LoadState {
    fn default() -> Self {
        LoadState::NotLoading { end_reached: false }
    }
}
