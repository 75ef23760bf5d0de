use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use campground_store::{
    Author, Campground, CampgroundStore, CampgroundUpdate, ImageRef, NewCampground,
};
use geocoder::Geocoder;
use image_store::{ImageStore, ImageUpload, is_allowed_image_file};

use crate::ownership::OwnershipGuard;
use crate::types::{Actor, CampgroundError, CampgroundForm};

/// Orchestrates a campground record's lifecycle across the store, the
/// geocoder, and the image store.
///
/// Each workflow is one sequential chain of awaited calls; nothing runs
/// in parallel because every step feeds the next, and workflows for
/// different records proceed independently. If a caller drops a workflow
/// future mid-chain, external side effects that already completed (an
/// upload, a deletion) are not rolled back.
pub struct CampgroundService {
    store: Arc<dyn CampgroundStore>,
    geocoder: Arc<dyn Geocoder>,
    images: Arc<dyn ImageStore>,
    guard: OwnershipGuard,
}

impl CampgroundService {
    /// Create a new lifecycle service over the given collaborators
    pub fn new(
        store: Arc<dyn CampgroundStore>,
        geocoder: Arc<dyn Geocoder>,
        images: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            store,
            geocoder,
            images,
            guard: OwnershipGuard,
        }
    }

    /// Create a campground from a validated form, a geocoded address, and
    /// an uploaded photo.
    ///
    /// The address is resolved before the image is uploaded so that an
    /// invalid address never leaves an orphaned stored image. A failure
    /// at any step abandons the whole operation with nothing persisted.
    pub async fn create_campground(
        &self,
        actor: &Actor,
        form: CampgroundForm,
        image: ImageUpload,
    ) -> Result<Campground, CampgroundError> {
        form.validate()
            .map_err(|e| CampgroundError::Validation(e.to_string()))?;

        if !is_allowed_image_file(&image.filename) {
            return Err(CampgroundError::InvalidImage(image.filename));
        }

        let geocoded = self.geocoder.geocode(&form.location).await?;

        let stored = self.images.upload(&image).await?;

        let record = NewCampground {
            name: form.name,
            description: form.description,
            price: form.price,
            location: geocoded.formatted_address,
            lat: geocoded.lat,
            lng: geocoded.lng,
            image_url: stored.url,
            image_id: stored.public_id,
            author: Author {
                id: actor.id,
                username: actor.username.clone(),
            },
        };

        let campground = self.store.create(record).await?;

        info!("User {} created campground {}", actor.id, campground.id);

        Ok(campground)
    }

    /// Update a campground's fields and, optionally, replace its photo.
    ///
    /// The update is all-or-nothing relative to address resolution: a
    /// geocoding failure aborts before anything is uploaded or persisted.
    /// When a replacement photo is supplied, the new image is uploaded
    /// and the record persisted before the old reference is released, so
    /// the record can never be left pointing at a destroyed image. The
    /// final release is best-effort; a failure there leaks the replaced
    /// image in storage and is logged.
    pub async fn update_campground(
        &self,
        actor: &Actor,
        id: Uuid,
        form: CampgroundForm,
        new_image: Option<ImageUpload>,
    ) -> Result<Campground, CampgroundError> {
        let existing = self.store.get(id).await?;

        self.guard.authorize(actor, &existing)?;

        form.validate()
            .map_err(|e| CampgroundError::Validation(e.to_string()))?;

        if let Some(ref image) = new_image {
            if !is_allowed_image_file(&image.filename) {
                return Err(CampgroundError::InvalidImage(image.filename.clone()));
            }
        }

        let geocoded = self.geocoder.geocode(&form.location).await?;

        let replacement = match new_image {
            Some(image) => Some(self.images.upload(&image).await?),
            None => None,
        };

        let patch = CampgroundUpdate {
            name: form.name,
            description: form.description,
            price: form.price,
            location: geocoded.formatted_address,
            lat: geocoded.lat,
            lng: geocoded.lng,
            image: replacement.as_ref().map(|stored| ImageRef {
                url: stored.url.clone(),
                public_id: stored.public_id.clone(),
            }),
        };

        let updated = self.store.update(id, patch).await?;

        if replacement.is_some() {
            // The record now references the new image, so the old
            // reference is unreachable and can be released.
            if let Err(e) = self.images.delete(&existing.image_id).await {
                warn!(
                    "Failed to release replaced image {} for campground {}: {}",
                    existing.image_id, id, e
                );
            }
        }

        info!("User {} updated campground {}", actor.id, updated.id);

        Ok(updated)
    }

    /// Delete a campground and release its stored photo.
    ///
    /// The image is released first; if the release fails the record is
    /// kept, so a stored image is never orphaned from the record that
    /// references it.
    pub async fn delete_campground(&self, actor: &Actor, id: Uuid) -> Result<(), CampgroundError> {
        let existing = self.store.get(id).await?;

        self.guard.authorize(actor, &existing)?;

        self.images.delete(&existing.image_id).await?;

        self.store.remove(id).await?;

        info!("User {} deleted campground {}", actor.id, id);

        Ok(())
    }

    /// Fetch a single campground by id
    pub async fn get_campground(&self, id: Uuid) -> Result<Campground, CampgroundError> {
        Ok(self.store.get(id).await?)
    }

    /// List all campgrounds, oldest first
    pub async fn list_campgrounds(&self) -> Result<Vec<Campground>, CampgroundError> {
        Ok(self.store.list().await?)
    }

    /// Search campgrounds whose name contains the query as literal text,
    /// case-insensitively.
    ///
    /// An empty match set is reported as [`CampgroundError::NoMatches`],
    /// a recoverable condition distinct from a store failure.
    pub async fn search_campgrounds(
        &self,
        query: &str,
    ) -> Result<Vec<Campground>, CampgroundError> {
        debug!("Searching campgrounds matching {:?}", query);

        let matches = self.store.find_by_name_substring(query).await?;

        if matches.is_empty() {
            return Err(CampgroundError::NoMatches);
        }

        Ok(matches)
    }

    /// List campgrounds created by the given author, oldest first
    pub async fn list_campgrounds_by_author(
        &self,
        author_id: Uuid,
    ) -> Result<Vec<Campground>, CampgroundError> {
        Ok(self.store.find_by_author(author_id).await?)
    }
}
