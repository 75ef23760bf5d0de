use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use campground_store::StoreError;
use geocoder::GeocodeError;
use image_store::ImageStoreError;

/// The authenticated user performing an operation, as supplied by the
/// session layer. Required for create, update, and delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// ID of the user
    pub id: Uuid,
    /// Username, snapshotted onto records the user creates
    pub username: String,
    /// Whether the user holds administrator privileges
    pub is_admin: bool,
}

/// Inbound form for creating or updating a campground
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CampgroundForm {
    /// Display name of the campground
    #[validate(length(min = 1, message = "Campground name is required"))]
    pub name: String,

    /// Price per night
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,

    /// Free-text description
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    /// Free-text address to geocode
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
}

/// Custom error type for campground lifecycle operations.
///
/// Every failure is scoped to the single request that produced it and
/// surfaces as one of these variants for the caller to present; adapter
/// failures keep their upstream message.
#[derive(Debug, thiserror::Error)]
pub enum CampgroundError {
    /// The submitted form failed validation
    #[error("validation error: {0}")]
    Validation(String),

    /// The submitted file is not an allowed image type
    #[error("only image files (jpg, jpeg, png, gif) are allowed: {0}")]
    InvalidImage(String),

    /// The address could not be geocoded
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The image could not be uploaded
    #[error("image upload failed: {0}")]
    UploadFailed(String),

    /// The stored image could not be released
    #[error("image deletion failed: {0}")]
    DeleteFailed(String),

    /// Campground not found
    #[error("campground not found")]
    NotFound,

    /// The actor neither owns this campground nor is an administrator
    #[error("you do not have permission to modify this campground")]
    Forbidden,

    /// No campground matched the search
    #[error("no campgrounds matched the search")]
    NoMatches,

    /// Store failure
    #[error("store error: {0}")]
    Store(String),
}

impl From<StoreError> for CampgroundError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => CampgroundError::NotFound,
            other => CampgroundError::Store(other.to_string()),
        }
    }
}

impl From<GeocodeError> for CampgroundError {
    fn from(err: GeocodeError) -> Self {
        CampgroundError::InvalidAddress(err.to_string())
    }
}

impl From<ImageStoreError> for CampgroundError {
    fn from(err: ImageStoreError) -> Self {
        match err {
            ImageStoreError::InvalidFileType(name) => CampgroundError::InvalidImage(name),
            ImageStoreError::Delete(message) => CampgroundError::DeleteFailed(message),
            other => CampgroundError::UploadFailed(other.to_string()),
        }
    }
}
