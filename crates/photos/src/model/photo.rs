//! Photo value types
//!
//! A `Photo` deliberately carries no favorite flag: favorite status lives in
//! the store only, and every display site asks the store.

use crate::error::{PhotosError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

// =============================================================================
// PhotoSource
// =============================================================================

/// Backing provider a photo came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoSource {
    Pexels,
    Unsplash,
    Pixabay,
}

impl PhotoSource {
    /// All known sources
    pub const ALL: [PhotoSource; 3] = [PhotoSource::Pexels, PhotoSource::Unsplash, PhotoSource::Pixabay];

    /// Machine-readable tag, as persisted
    pub fn as_str(&self) -> &'static str {
        match self {
            PhotoSource::Pexels => "pexels",
            PhotoSource::Unsplash => "unsplash",
            PhotoSource::Pixabay => "pixabay",
        }
    }

    /// Display name (e.g., "Pexels")
    pub fn name(&self) -> &'static str {
        match self {
            PhotoSource::Pexels => "Pexels",
            PhotoSource::Unsplash => "Unsplash",
            PhotoSource::Pixabay => "Pixabay",
        }
    }
}

impl fmt::Display for PhotoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhotoSource {
    type Err = PhotosError;

    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim().to_lowercase();
        PhotoSource::ALL
            .into_iter()
            .find(|source| source.as_str() == tag)
            .ok_or_else(|| PhotosError::InvalidSource(s.to_string()))
    }
}

// =============================================================================
// PhotoKey
// =============================================================================

/// Identity of a photo: provider-specific ID plus the provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PhotoKey {
    pub id: String,
    pub source: PhotoSource,
}

impl PhotoKey {
    pub fn new(id: impl Into<String>, source: PhotoSource) -> Self {
        Self {
            id: id.into(),
            source,
        }
    }
}

impl fmt::Display for PhotoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.source, self.id)
    }
}

// =============================================================================
// PhotoUrls
// =============================================================================

/// Resolution-specific image URLs
///
/// Empty strings are treated as missing.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoUrls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large2x: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landscape: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiny: Option<String>,
}

fn present(url: &Option<String>) -> Option<&str> {
    url.as_deref().filter(|u| !u.trim().is_empty())
}

impl PhotoUrls {
    /// URLs holding only a preview (what a favorite record keeps)
    pub fn preview_only(url: impl Into<String>) -> Self {
        Self {
            medium: Some(url.into()),
            ..Self::default()
        }
    }

    /// Thumbnail used by list rows
    pub fn preview(&self) -> Option<&str> {
        present(&self.medium)
            .or_else(|| present(&self.small))
            .or_else(|| present(&self.large))
            .or_else(|| present(&self.tiny))
    }

    /// Image shown on the detail screen
    pub fn full_preview(&self) -> Option<&str> {
        present(&self.large2x)
            .or_else(|| present(&self.large))
            .or_else(|| present(&self.original))
            .or_else(|| self.preview())
    }

    /// Image saved by "download"
    pub fn download(&self) -> Option<&str> {
        present(&self.original).or_else(|| self.full_preview())
    }
}

// =============================================================================
// Photographer
// =============================================================================

/// Author attribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photographer {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Photographer {
    pub fn new(name: impl Into<String>, url: Option<String>) -> Self {
        Self {
            name: name.into(),
            url,
        }
    }
}

// =============================================================================
// Photo
// =============================================================================

/// A photo from one of the providers
///
/// Equality and hashing go by [`PhotoKey`] only: a refreshed instance of the
/// same photo compares equal to the stale one it replaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    /// Provider-specific ID
    pub id: String,
    /// Provider the photo came from
    pub source: PhotoSource,
    #[serde(default)]
    pub urls: PhotoUrls,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photographer: Option<Photographer>,
    /// Photo page on the provider's site
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_url: Option<String>,
    /// Rebuilt from a favorite record rather than a provider listing
    #[serde(default, skip_serializing_if = "is_false")]
    partial: bool,
}

fn is_false(value: &bool) -> bool {
    !value
}

impl Photo {
    /// Create a photo with identity only
    pub fn new(id: impl Into<String>, source: PhotoSource) -> Self {
        Self {
            id: id.into(),
            source,
            urls: PhotoUrls::default(),
            photographer: None,
            share_url: None,
            partial: false,
        }
    }

    /// Rebuild a partial photo from a stored key and preview URL
    pub fn from_key(key: PhotoKey, preview_url: Option<String>) -> Self {
        let mut photo = Self::new(key.id, key.source);
        photo.partial = true;
        if let Some(url) = preview_url {
            photo.urls = PhotoUrls::preview_only(url);
        }
        photo
    }

    pub fn with_urls(mut self, urls: PhotoUrls) -> Self {
        self.urls = urls;
        self
    }

    pub fn with_photographer(mut self, name: impl Into<String>, url: Option<String>) -> Self {
        self.photographer = Some(Photographer::new(name, url));
        self
    }

    pub fn with_share_url(mut self, url: impl Into<String>) -> Self {
        self.share_url = Some(url.into());
        self
    }

    /// Identity of this photo
    pub fn key(&self) -> PhotoKey {
        PhotoKey::new(self.id.clone(), self.source)
    }

    /// True for photos rebuilt from a favorite record; full metadata has to
    /// be fetched again before the detail screen can show attribution.
    pub fn is_partial(&self) -> bool {
        self.partial
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.urls.preview()
    }

    pub fn full_preview_url(&self) -> Option<&str> {
        self.urls.full_preview()
    }

    pub fn download_url(&self) -> Option<&str> {
        self.urls.download()
    }

    pub fn photographer_name(&self) -> Option<&str> {
        self.photographer.as_ref().map(|p| p.name.as_str())
    }

    pub fn photographer_url(&self) -> Option<&str> {
        self.photographer.as_ref().and_then(|p| p.url.as_deref())
    }

    /// Text handed to the platform share sheet
    pub fn share_text(&self) -> String {
        let mut text = match self.photographer_name() {
            Some(name) => format!("Photo by {} on {}", name, self.source.name()),
            None => format!("Photo on {}", self.source.name()),
        };
        if let Some(url) = self.share_url.as_deref().or_else(|| self.download_url()) {
            text.push(' ');
            text.push_str(url);
        }
        text
    }
}

impl PartialEq for Photo {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.id == other.id
    }
}

impl Eq for Photo {}

impl Hash for Photo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.source.hash(state);
    }
}
