use serde::{Deserialize, Serialize};

/// A stored image reference returned by the storage provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredImage {
    /// Publicly resolvable URL of the image
    pub url: String,
    /// Opaque reference used to delete the image from storage
    pub public_id: String,
}

/// Binary image payload submitted for upload.
///
/// The filename is used only to check the extension allow-list; storage
/// assigns its own reference and the filename is never persisted.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Original filename of the uploaded file
    pub filename: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

/// Custom error type for image storage operations
#[derive(Debug, thiserror::Error)]
pub enum ImageStoreError {
    /// The file is not an allowed image type
    #[error("only image files are allowed: {0}")]
    InvalidFileType(String),

    /// Upload to the storage provider failed
    #[error("image upload failed: {0}")]
    Upload(String),

    /// Deletion from the storage provider failed
    #[error("image deletion failed: {0}")]
    Delete(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}
