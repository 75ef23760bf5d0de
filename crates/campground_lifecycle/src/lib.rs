//! # Campground Lifecycle
//!
//! This crate coordinates a campground record's persistent state with two
//! independently-failing external resources: an address geocoder and an
//! image store. It enforces ownership-based authorization on mutation and
//! supports substring search over listings.

/// Actor, form, and failure types for lifecycle operations
mod types;
pub use types::*;

/// Ownership-based authorization for mutations
mod ownership;
pub use ownership::*;

/// The orchestrating lifecycle service
mod service;
pub use service::*;
