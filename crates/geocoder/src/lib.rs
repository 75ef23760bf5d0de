//! # Geocoder
//!
//! This crate resolves free-text addresses into coordinates and a
//! canonical address string for campground listings, using the Google
//! Geocoding API.

/// Types and errors for geocoding operations
mod types;
pub use types::*;

/// Google Geocoding API client
mod google;
pub use google::*;
