use async_trait::async_trait;
use uuid::Uuid;

use crate::types::{Campground, CampgroundUpdate, NewCampground, StoreError};

/// Persistent store for campground records.
///
/// Every operation targets a single record and is atomic with respect to
/// it; no multi-record transactions are offered. Two concurrent updates
/// to the same record race at the application level and resolve
/// last-write-wins (there is no version column).
#[async_trait]
pub trait CampgroundStore: Send + Sync {
    /// Persist a new record, assigning its id and timestamps
    async fn create(&self, record: NewCampground) -> Result<Campground, StoreError>;

    /// Fetch a record by id
    async fn get(&self, id: Uuid) -> Result<Campground, StoreError>;

    /// Apply an update to a record, returning the new state
    async fn update(&self, id: Uuid, patch: CampgroundUpdate) -> Result<Campground, StoreError>;

    /// Remove a record
    async fn remove(&self, id: Uuid) -> Result<(), StoreError>;

    /// List all records, oldest first
    async fn list(&self) -> Result<Vec<Campground>, StoreError>;

    /// Find records whose name contains the pattern as literal text,
    /// case-insensitively. Regular-expression metacharacters in the
    /// pattern match themselves, so `a.b` matches only the text `a.b`.
    async fn find_by_name_substring(&self, pattern: &str) -> Result<Vec<Campground>, StoreError>;

    /// List records created by the given author, oldest first
    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Campground>, StoreError>;
}
