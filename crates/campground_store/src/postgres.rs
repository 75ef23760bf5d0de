use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::store::CampgroundStore;
use crate::types::{Author, Campground, CampgroundUpdate, NewCampground, StoreError};

/// Creates a connection pool to the PostgreSQL database.
pub async fn create_connection_pool() -> Result<PgPool, sqlx::Error> {
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgres://localhost/campgrounds".to_string());

    PgPool::connect(&database_url).await
}

/// PostgreSQL-backed campground store
pub struct PgCampgroundStore {
    pool: PgPool,
}

const RECORD_COLUMNS: &str = "id, name, description, price, location, lat, lng, \
     image_url, image_id, author_id, author_username, comment_ids, \
     created_at, updated_at";

impl PgCampgroundStore {
    /// Creates a new store over the provided connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the campgrounds table if it does not exist yet
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS campgrounds (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                price DOUBLE PRECISION NOT NULL,
                location TEXT NOT NULL,
                lat DOUBLE PRECISION NOT NULL,
                lng DOUBLE PRECISION NOT NULL,
                image_url TEXT NOT NULL,
                image_id TEXT NOT NULL,
                author_id UUID NOT NULL,
                author_username TEXT NOT NULL,
                comment_ids UUID[] NOT NULL DEFAULT '{}',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Map a database row onto a campground record
    fn map_row(row: &PgRow) -> Campground {
        Campground {
            id: row.get("id"),
            name: row.get("name"),
            description: row.get("description"),
            price: row.get("price"),
            location: row.get("location"),
            lat: row.get("lat"),
            lng: row.get("lng"),
            image_url: row.get("image_url"),
            image_id: row.get("image_id"),
            author: Author {
                id: row.get("author_id"),
                username: row.get("author_username"),
            },
            comments: row.get("comment_ids"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}

/// Escape LIKE wildcards so a search pattern matches as literal text.
/// Backslash is PostgreSQL's default LIKE escape character.
fn escape_like(pattern: &str) -> String {
    pattern
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait]
impl CampgroundStore for PgCampgroundStore {
    async fn create(&self, record: NewCampground) -> Result<Campground, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO campgrounds (
                name, description, price, location, lat, lng,
                image_url, image_id, author_id, author_username
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {RECORD_COLUMNS}
            "#,
        ))
        .bind(&record.name)
        .bind(&record.description)
        .bind(record.price)
        .bind(&record.location)
        .bind(record.lat)
        .bind(record.lng)
        .bind(&record.image_url)
        .bind(&record.image_id)
        .bind(record.author.id)
        .bind(&record.author.username)
        .fetch_one(&self.pool)
        .await?;

        Ok(Self::map_row(&row))
    }

    async fn get(&self, id: Uuid) -> Result<Campground, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {RECORD_COLUMNS} FROM campgrounds WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Self::map_row(&row)),
            None => Err(StoreError::NotFound),
        }
    }

    async fn update(&self, id: Uuid, patch: CampgroundUpdate) -> Result<Campground, StoreError> {
        let (image_url, image_id) = match &patch.image {
            Some(image) => (Some(image.url.clone()), Some(image.public_id.clone())),
            None => (None, None),
        };

        let row = sqlx::query(&format!(
            r#"
            UPDATE campgrounds
            SET name = $1,
                description = $2,
                price = $3,
                location = $4,
                lat = $5,
                lng = $6,
                image_url = COALESCE($7, image_url),
                image_id = COALESCE($8, image_id),
                updated_at = NOW()
            WHERE id = $9
            RETURNING {RECORD_COLUMNS}
            "#,
        ))
        .bind(&patch.name)
        .bind(&patch.description)
        .bind(patch.price)
        .bind(&patch.location)
        .bind(patch.lat)
        .bind(patch.lng)
        .bind(image_url)
        .bind(image_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Self::map_row(&row)),
            None => Err(StoreError::NotFound),
        }
    }

    async fn remove(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM campgrounds WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Campground>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {RECORD_COLUMNS} FROM campgrounds ORDER BY created_at ASC",
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::map_row).collect())
    }

    async fn find_by_name_substring(&self, pattern: &str) -> Result<Vec<Campground>, StoreError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {RECORD_COLUMNS}
            FROM campgrounds
            WHERE name ILIKE '%' || $1 || '%'
            ORDER BY created_at ASC
            "#,
        ))
        .bind(escape_like(pattern))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::map_row).collect())
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Campground>, StoreError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {RECORD_COLUMNS}
            FROM campgrounds
            WHERE author_id = $1
            ORDER BY created_at ASC
            "#,
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::map_row).collect())
    }
}
