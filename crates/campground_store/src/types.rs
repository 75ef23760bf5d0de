use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable snapshot of the creating user, taken at creation time.
///
/// The snapshot survives later changes to the account's display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    /// ID of the creating user
    pub id: Uuid,
    /// Username of the creating user at creation time
    pub username: String,
}

/// A campground listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campground {
    /// Unique identifier, assigned at creation
    pub id: Uuid,
    /// Display name of the campground
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Price per night
    pub price: f64,
    /// Canonical address string returned by geocoding
    pub location: String,
    /// Latitude, from the same geocoding call as `location`
    pub lat: f64,
    /// Longitude, from the same geocoding call as `location`
    pub lng: f64,
    /// Publicly resolvable URL of the current photo
    pub image_url: String,
    /// Storage reference that deletes the current photo
    pub image_id: String,
    /// Snapshot of the creator, never modified after creation
    pub author: Author,
    /// Ordered comment ids (comment storage lives elsewhere)
    pub comments: Vec<Uuid>,
    /// When the record was created
    pub created_at: DateTime<Utc>,
    /// When the record was last updated
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a new campground record.
///
/// The store assigns the id and timestamps; the image pair and the
/// address triple arrive already resolved.
#[derive(Debug, Clone)]
pub struct NewCampground {
    /// Display name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Price per night
    pub price: f64,
    /// Canonical address
    pub location: String,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
    /// URL of the uploaded photo
    pub image_url: String,
    /// Storage reference of the uploaded photo
    pub image_id: String,
    /// Snapshot of the creator
    pub author: Author,
}

/// Replacement image reference carried by an update
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRef {
    /// Publicly resolvable URL
    pub url: String,
    /// Storage deletion reference
    pub public_id: String,
}

/// Update payload applied to an existing record.
///
/// The address triple is always rewritten together; the image reference
/// is replaced only when a replacement is present. The author snapshot is
/// not part of the payload and cannot be changed.
#[derive(Debug, Clone)]
pub struct CampgroundUpdate {
    /// New display name
    pub name: String,
    /// New description
    pub description: String,
    /// New price per night
    pub price: f64,
    /// New canonical address
    pub location: String,
    /// New latitude
    pub lat: f64,
    /// New longitude
    pub lng: f64,
    /// Replacement photo reference, when the photo changed
    pub image: Option<ImageRef>,
}

/// Custom error type for campground store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Campground not found
    #[error("campground not found")]
    NotFound,

    /// Search pattern could not be compiled into a matcher
    #[error("invalid search pattern: {0}")]
    InvalidPattern(String),
}
