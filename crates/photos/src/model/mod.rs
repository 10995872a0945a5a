//! Photo model
//!
//! Value types shared by the store, the bus and every screen.

pub mod pexels;
pub mod photo;

// Re-exports
pub use pexels::{parse_listing, PexelsListing, PexelsPhoto};
pub use photo::{Photo, PhotoKey, PhotoSource, PhotoUrls, Photographer};
