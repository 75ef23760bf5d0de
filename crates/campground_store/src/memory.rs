use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use regex::RegexBuilder;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::CampgroundStore;
use crate::types::{Campground, CampgroundUpdate, NewCampground, StoreError};

/// In-memory campground store backed by a `HashMap`.
///
/// Per-record atomicity comes from the single `RwLock` guarding the map;
/// readers for unrelated records proceed concurrently.
pub struct InMemoryCampgroundStore {
    records: RwLock<HashMap<Uuid, Campground>>,
}

impl InMemoryCampgroundStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl CampgroundStore for InMemoryCampgroundStore {
    async fn create(&self, record: NewCampground) -> Result<Campground, StoreError> {
        let now = Utc::now();
        let campground = Campground {
            id: Uuid::new_v4(),
            name: record.name,
            description: record.description,
            price: record.price,
            location: record.location,
            lat: record.lat,
            lng: record.lng,
            image_url: record.image_url,
            image_id: record.image_id,
            author: record.author,
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        let mut records = self.records.write().await;
        records.insert(campground.id, campground.clone());

        Ok(campground)
    }

    async fn get(&self, id: Uuid) -> Result<Campground, StoreError> {
        let records = self.records.read().await;
        records.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn update(&self, id: Uuid, patch: CampgroundUpdate) -> Result<Campground, StoreError> {
        let mut records = self.records.write().await;
        let campground = records.get_mut(&id).ok_or(StoreError::NotFound)?;

        campground.name = patch.name;
        campground.description = patch.description;
        campground.price = patch.price;
        campground.location = patch.location;
        campground.lat = patch.lat;
        campground.lng = patch.lng;

        if let Some(image) = patch.image {
            campground.image_url = image.url;
            campground.image_id = image.public_id;
        }

        campground.updated_at = Utc::now();

        Ok(campground.clone())
    }

    async fn remove(&self, id: Uuid) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        records.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }

    async fn list(&self) -> Result<Vec<Campground>, StoreError> {
        let records = self.records.read().await;
        let mut all: Vec<Campground> = records.values().cloned().collect();
        all.sort_by_key(|campground| campground.created_at);

        Ok(all)
    }

    async fn find_by_name_substring(&self, pattern: &str) -> Result<Vec<Campground>, StoreError> {
        let matcher = RegexBuilder::new(&regex::escape(pattern))
            .case_insensitive(true)
            .build()
            .map_err(|e| StoreError::InvalidPattern(e.to_string()))?;

        let records = self.records.read().await;
        let mut matches: Vec<Campground> = records
            .values()
            .filter(|campground| matcher.is_match(&campground.name))
            .cloned()
            .collect();
        matches.sort_by_key(|campground| campground.created_at);

        Ok(matches)
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Campground>, StoreError> {
        let records = self.records.read().await;
        let mut matches: Vec<Campground> = records
            .values()
            .filter(|campground| campground.author.id == author_id)
            .cloned()
            .collect();
        matches.sort_by_key(|campground| campground.created_at);

        Ok(matches)
    }
}
