//! Photo feeds
//!
//! A feed hands out 1-based pages of photos. Feeds are the only thing the
//! pager knows about where photos come from.

use super::types::FeedPage;
use crate::error::{AppError, Result};
use photos::favorites::FavoritesStore;
use photos::model::{parse_listing, Photo};
use std::sync::Arc;

/// A paged source of photos
pub trait PhotoFeed {
    /// Short label for logs and headers
    fn name(&self) -> &str;

    /// Load `page` (1-based) holding at most `per_page` photos
    fn load_page(&self, page: u32, per_page: u32) -> Result<FeedPage>;
}

/// Slice `photos` into the requested page
fn slice_page(photos: &[Photo], page: u32, per_page: u32) -> Result<FeedPage> {
    if page == 0 || per_page == 0 {
        return Err(AppError::Config(format!(
            "invalid page request (page {}, per_page {})",
            page, per_page
        )));
    }

    let start = (page as usize - 1).saturating_mul(per_page as usize);
    let end = start.saturating_add(per_page as usize).min(photos.len());
    if start >= photos.len() {
        return Ok(FeedPage::last(Vec::new()));
    }

    let next_page = (end < photos.len()).then_some(page + 1);
    Ok(FeedPage::new(photos[start..end].to_vec(), next_page))
}

// =============================================================================
// Static feed
// =============================================================================

/// A fixed list of photos, e.g. a saved listing
#[derive(Debug, Clone)]
pub struct StaticFeed {
    name: String,
    photos: Vec<Photo>,
}

impl StaticFeed {
    pub fn new(name: impl Into<String>, photos: Vec<Photo>) -> Self {
        Self {
            name: name.into(),
            photos,
        }
    }

    /// Build from a Pexels-shaped JSON listing
    pub fn from_listing_json(name: impl Into<String>, json: &str) -> Result<Self> {
        Ok(Self::new(name, parse_listing(json)?))
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

impl PhotoFeed for StaticFeed {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_page(&self, page: u32, per_page: u32) -> Result<FeedPage> {
        slice_page(&self.photos, page, per_page)
    }
}

// =============================================================================
// Favorites feed
// =============================================================================

/// Pages over the current favorites, oldest first
pub struct FavoritesFeed {
    store: Arc<FavoritesStore>,
}

impl FavoritesFeed {
    pub fn new(store: Arc<FavoritesStore>) -> Self {
        Self { store }
    }
}

impl PhotoFeed for FavoritesFeed {
    fn name(&self) -> &str {
        "favorites"
    }

    fn load_page(&self, page: u32, per_page: u32) -> Result<FeedPage> {
        let favorites = self.store.list_favorites()?;
        slice_page(&favorites, page, per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photos::favorites::MemoryRepository;
    use photos::model::PhotoSource;

    fn photos(n: usize) -> Vec<Photo> {
        (1..=n)
            .map(|i| Photo::new(i.to_string(), PhotoSource::Pexels))
            .collect()
    }

    #[test]
    fn test_static_pages() {
        let feed = StaticFeed::new("fixture", photos(5));

        let first = feed.load_page(1, 2).unwrap();
        assert_eq!(first.photos.len(), 2);
        assert_eq!(first.next_page, Some(2));

        let last = feed.load_page(3, 2).unwrap();
        assert_eq!(last.photos.len(), 1);
        assert_eq!(last.photos[0].id, "5");
        assert_eq!(last.next_page, None);
    }

    #[test]
    fn test_exact_fit_has_no_next_page() {
        let feed = StaticFeed::new("fixture", photos(4));
        assert_eq!(feed.load_page(2, 2).unwrap().next_page, None);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let feed = StaticFeed::new("fixture", photos(3));
        let page = feed.load_page(9, 10).unwrap();
        assert!(page.photos.is_empty());
        assert_eq!(page.next_page, None);
    }

    #[test]
    fn test_page_zero_is_rejected() {
        let feed = StaticFeed::new("fixture", photos(3));
        assert!(feed.load_page(0, 10).is_err());
        assert!(feed.load_page(1, 0).is_err());
    }

    #[test]
    fn test_from_listing_json() {
        let json = r#"{
            "page": 1,
            "per_page": 2,
            "photos": [
                {"id": 10, "photographer": "Ann", "src": {"medium": "https://m/10"}},
                {"id": 11, "photographer": "Bo", "src": {"medium": "https://m/11"}}
            ]
        }"#;
        let feed = StaticFeed::from_listing_json("pexels", json).unwrap();
        assert_eq!(feed.len(), 2);
        assert_eq!(feed.name(), "pexels");
    }

    #[test]
    fn test_favorites_feed_follows_store() {
        let store = Arc::new(FavoritesStore::new(MemoryRepository::new()));
        let feed = FavoritesFeed::new(store.clone());
        assert!(feed.load_page(1, 10).unwrap().photos.is_empty());

        for photo in photos(3) {
            store.set_favorite(&photo, true).unwrap();
        }
        let page = feed.load_page(1, 2).unwrap();
        let ids: Vec<_> = page.photos.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(page.next_page, Some(2));
    }
}
