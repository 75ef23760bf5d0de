//! # Campground Store
//!
//! This crate persists campground records and supports lookup by id,
//! case-insensitive substring search by name, and listing by author. It
//! ships a PostgreSQL backend and an in-memory backend.

/// Record types and store errors
mod types;
pub use types::*;

/// The store contract
mod store;
pub use store::*;

/// PostgreSQL-backed store
mod postgres;
pub use postgres::*;

/// In-memory store for tests and embedded use
mod memory;
pub use memory::*;
