//! # Image Store
//!
//! This crate provides durable photo storage for campground listings. It
//! uploads binary image payloads to Cloudinary, deletes them by
//! reference, and enforces the image file-type allow-list.

/// Types and errors for image storage operations
mod types;
pub use types::*;

/// Image file-type allow-list
mod filter;
pub use filter::*;

/// Cloudinary storage client
mod cloudinary;
pub use cloudinary::*;
