use tracing::debug;

use campground_store::Campground;

use crate::types::{Actor, CampgroundError};

/// Authorizes mutation of a campground record.
///
/// Mutation is allowed only to the record's owner (by author id) or to an
/// administrator. Creation needs no guard; the session layer already
/// guarantees an authenticated actor.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnershipGuard;

impl OwnershipGuard {
    /// Check whether the actor may mutate the campground
    pub fn authorize(&self, actor: &Actor, campground: &Campground) -> Result<(), CampgroundError> {
        if actor.is_admin || actor.id == campground.author.id {
            return Ok(());
        }

        debug!(
            "Denied mutation of campground {} to user {}",
            campground.id, actor.id
        );

        Err(CampgroundError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use campground_store::Author;

    use super::*;

    fn campground_owned_by(author: Author) -> Campground {
        let now = Utc::now();

        Campground {
            id: Uuid::new_v4(),
            name: "Pine Ridge".to_string(),
            description: "quiet".to_string(),
            price: 20.0,
            location: "Denver, CO, USA".to_string(),
            lat: 39.7,
            lng: -104.9,
            image_url: "https://cdn/photo.jpg".to_string(),
            image_id: "img_1".to_string(),
            author,
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn actor(id: Uuid, is_admin: bool) -> Actor {
        Actor {
            id,
            username: "jess".to_string(),
            is_admin,
        }
    }

    #[test]
    fn test_owner_is_allowed() {
        let owner_id = Uuid::new_v4();
        let campground = campground_owned_by(Author {
            id: owner_id,
            username: "jess".to_string(),
        });

        assert!(
            OwnershipGuard
                .authorize(&actor(owner_id, false), &campground)
                .is_ok()
        );
    }

    #[test]
    fn test_admin_is_allowed() {
        let campground = campground_owned_by(Author {
            id: Uuid::new_v4(),
            username: "jess".to_string(),
        });

        assert!(
            OwnershipGuard
                .authorize(&actor(Uuid::new_v4(), true), &campground)
                .is_ok()
        );
    }

    #[test]
    fn test_other_users_are_denied() {
        let campground = campground_owned_by(Author {
            id: Uuid::new_v4(),
            username: "jess".to_string(),
        });

        assert!(matches!(
            OwnershipGuard.authorize(&actor(Uuid::new_v4(), false), &campground),
            Err(CampgroundError::Forbidden)
        ));
    }
}
