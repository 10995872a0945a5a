//! Paged list loading
//!
//! `Pager` accumulates pages from a [`PhotoFeed`] into one snapshot the list
//! screen renders, tracking load state and the next page key.

pub mod feed;
pub mod types;

pub use feed::{FavoritesFeed, PhotoFeed, StaticFeed};
pub use types::{FeedPage, LoadState};

use crate::error::Result;
use photos::config::paging::{DEFAULT_PER_PAGE, FIRST_PAGE};
use photos::model::{Photo, PhotoKey};
use std::collections::HashSet;

/// Request to re-issue after a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Request {
    Refresh,
    Append(u32),
}

/// Accumulating pager over a feed
pub struct Pager<F: PhotoFeed> {
    feed: F,
    per_page: u32,
    photos: Vec<Photo>,
    keys: HashSet<PhotoKey>,
    next_page: Option<u32>,
    state: LoadState,
    failed: Option<Request>,
}

impl<F: PhotoFeed> Pager<F> {
    pub fn new(feed: F) -> Self {
        Self {
            feed,
            per_page: DEFAULT_PER_PAGE,
            photos: Vec::new(),
            keys: HashSet::new(),
            next_page: Some(FIRST_PAGE),
            state: LoadState::default(),
            failed: None,
        }
    }

    /// Set page size (zero falls back to the default)
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = if per_page == 0 { DEFAULT_PER_PAGE } else { per_page };
        self
    }

    pub fn feed(&self) -> &F {
        &self.feed
    }

    /// Current snapshot
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn next_page(&self) -> Option<u32> {
        self.next_page
    }

    /// Reload from the first page, replacing the snapshot on success
    pub fn refresh(&mut self) -> Result<usize> {
        self.run(Request::Refresh)
    }

    /// Append the next page; no-op at the end or while a failure is pending
    pub fn load_next(&mut self) -> Result<usize> {
        if self.failed.is_some() {
            return Ok(0);
        }
        match self.next_page {
            Some(page) => self.run(Request::Append(page)),
            None => Ok(0),
        }
    }

    /// Re-issue the request that last failed
    pub fn retry(&mut self) -> Result<usize> {
        match self.failed {
            Some(request) => self.run(request),
            None => Ok(0),
        }
    }

    fn run(&mut self, request: Request) -> Result<usize> {
        let page = match request {
            Request::Refresh => FIRST_PAGE,
            Request::Append(page) => page,
        };

        self.state = LoadState::Loading;
        log::debug!("{}: loading page {}", self.feed.name(), page);

        let loaded = match self.feed.load_page(page, self.per_page) {
            Ok(loaded) => loaded,
            Err(e) => {
                log::warn!("{}: page {} failed: {}", self.feed.name(), page, e);
                self.state = LoadState::Error(e.to_string());
                self.failed = Some(request);
                return Err(e);
            }
        };

        if request == Request::Refresh {
            self.photos.clear();
            self.keys.clear();
        }
        self.failed = None;
        self.next_page = loaded.next_page;

        let before = self.photos.len();
        for photo in loaded.photos {
            if self.keys.insert(photo.key()) {
                self.photos.push(photo);
            }
        }
        let appended = self.photos.len() - before;

        self.state = LoadState::NotLoading {
            end_reached: self.next_page.is_none(),
        };
        Ok(appended)
    }
}
