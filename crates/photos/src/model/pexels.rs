//! Pexels wire format
//!
//! Serde mirror of the Pexels photo objects, converted into [`Photo`].
//! Lets fixture files and cached listings feed the list screens.

use crate::error::Result;
use serde::Deserialize;

use super::photo::{Photo, PhotoSource, PhotoUrls};

#[derive(Debug, Default, Deserialize)]
pub struct PexelsSrc {
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub large: String,
    #[serde(default)]
    pub large2x: String,
    #[serde(default)]
    pub medium: String,
    #[serde(default)]
    pub small: String,
    #[serde(default)]
    pub portrait: String,
    #[serde(default)]
    pub landscape: String,
    #[serde(default)]
    pub tiny: String,
}

/// A single photo object as Pexels returns it
#[derive(Debug, Deserialize)]
pub struct PexelsPhoto {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub photographer: String,
    #[serde(default)]
    pub photographer_url: String,
    #[serde(default)]
    pub src: PexelsSrc,
}

/// A page of photos (`/curated`, `/search`)
///
/// Only the photos are kept; paging is driven by the feed, not the listing.
#[derive(Debug, Deserialize)]
pub struct PexelsListing {
    #[serde(default)]
    pub photos: Vec<PexelsPhoto>,
}

/// Convert an empty string to None
fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

impl From<PexelsSrc> for PhotoUrls {
    fn from(src: PexelsSrc) -> Self {
        Self {
            original: non_empty(src.original),
            large: non_empty(src.large),
            large2x: non_empty(src.large2x),
            medium: non_empty(src.medium),
            small: non_empty(src.small),
            portrait: non_empty(src.portrait),
            landscape: non_empty(src.landscape),
            tiny: non_empty(src.tiny),
        }
    }
}

impl From<PexelsPhoto> for Photo {
    fn from(p: PexelsPhoto) -> Self {
        let mut photo = Photo::new(p.id.to_string(), PhotoSource::Pexels).with_urls(p.src.into());
        if let Some(name) = non_empty(p.photographer) {
            photo = photo.with_photographer(name, non_empty(p.photographer_url));
        }
        if let Some(url) = non_empty(p.url) {
            photo = photo.with_share_url(url);
        }
        photo
    }
}

/// Parse a Pexels listing document into photos
pub fn parse_listing(json: &str) -> Result<Vec<Photo>> {
    let listing: PexelsListing = serde_json::from_str(json)?;
    Ok(listing.photos.into_iter().map(Photo::from).collect())
}
