use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool, Row, postgres::PgRow};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    domain::{
        errors::{RepositoryError, RepositoryResult},
        models::{Property, PropertyDetails, PropertyImage},
        value_objects::{AgentId, ImageId, PropertyId, PublicId},
    },
    ports::repositories::PropertyRepository,
};

/// SQL-based implementation of PropertyRepository using PostgreSQL
#[derive(Clone)]
pub struct SqlPropertyRepository {
    pool: PgPool,
}

const PROPERTY_COLUMNS: &str = "id, agent_id, title, description, address, rental_amount, \
     bedrooms, bathrooms, created_at, updated_at";

const IMAGE_COLUMNS: &str =
    "id, property_id, image_url, image_public_id, display_order, is_primary, created_at";

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> RepositoryError {
    move |e| RepositoryError::Infrastructure {
        message: format!("Database error {}: {}", context, e),
        source: Some(e.to_string()),
    }
}

impl SqlPropertyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Connect to PostgreSQL
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self::new(pool))
    }

    /// Initialize database tables
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::raw_sql(
            r#"
            CREATE TABLE IF NOT EXISTS properties (
                id UUID PRIMARY KEY,
                agent_id BIGINT NOT NULL,
                title VARCHAR(200) NOT NULL,
                description TEXT NOT NULL,
                address VARCHAR(500) NOT NULL,
                rental_amount NUMERIC(12, 2) NOT NULL,
                bedrooms INTEGER NOT NULL,
                bathrooms INTEGER NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );

            CREATE TABLE IF NOT EXISTS property_images (
                id UUID PRIMARY KEY,
                property_id UUID NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
                image_url TEXT NOT NULL,
                image_public_id TEXT NOT NULL DEFAULT '',
                display_order INTEGER NOT NULL,
                position INTEGER NOT NULL DEFAULT 0,
                is_primary BOOLEAN NOT NULL DEFAULT FALSE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );

            ALTER TABLE property_images ADD COLUMN IF NOT EXISTS position INTEGER NOT NULL DEFAULT 0;

            CREATE INDEX IF NOT EXISTS idx_properties_agent ON properties(agent_id, created_at DESC);
            CREATE INDEX IF NOT EXISTS idx_property_images_property ON property_images(property_id, display_order);
            CREATE UNIQUE INDEX IF NOT EXISTS idx_property_images_one_primary
                ON property_images(property_id) WHERE is_primary;
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn load_images(
        &self,
        property_ids: &[Uuid],
    ) -> RepositoryResult<HashMap<Uuid, Vec<PropertyImage>>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM property_images WHERE property_id = ANY($1) \
             ORDER BY display_order, position",
            IMAGE_COLUMNS
        ))
        .bind(property_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("loading images"))?;

        let mut images: HashMap<Uuid, Vec<PropertyImage>> = HashMap::new();
        for row in &rows {
            let image = image_from_row(row).map_err(db_error("decoding image row"))?;
            images
                .entry(*image.property_id.as_uuid())
                .or_default()
                .push(image);
        }

        Ok(images)
    }

    async fn hydrate(&self, rows: Vec<PgRow>) -> RepositoryResult<Vec<Property>> {
        let mut properties = rows
            .iter()
            .map(property_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_error("decoding property row"))?;

        let ids: Vec<Uuid> = properties.iter().map(|p| *p.id.as_uuid()).collect();
        let mut images = self.load_images(&ids).await?;

        for property in &mut properties {
            property.images = images.remove(property.id.as_uuid()).unwrap_or_default();
        }

        Ok(properties)
    }
}

fn property_from_row(row: &PgRow) -> Result<Property, sqlx::Error> {
    let agent_id: i64 = row.try_get("agent_id")?;
    let bedrooms: i32 = row.try_get("bedrooms")?;
    let bathrooms: i32 = row.try_get("bathrooms")?;

    Ok(Property {
        id: PropertyId::from_uuid(row.try_get("id")?),
        agent_id: AgentId::new(agent_id).map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        details: PropertyDetails {
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            address: row.try_get("address")?,
            rental_amount: row.try_get("rental_amount")?,
            bedrooms: u32::try_from(bedrooms).map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
            bathrooms: u32::try_from(bathrooms).map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        },
        images: Vec::new(),
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

fn image_from_row(row: &PgRow) -> Result<PropertyImage, sqlx::Error> {
    Ok(PropertyImage {
        id: ImageId::from_uuid(row.try_get("id")?),
        property_id: PropertyId::from_uuid(row.try_get("property_id")?),
        url: row.try_get("image_url")?,
        public_id: PublicId::from_stored(row.try_get("image_public_id")?),
        display_order: row.try_get("display_order")?,
        is_primary: row.try_get("is_primary")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Insert image rows; `position` records slice order so display-order ties
/// read back in insertion order
async fn insert_images(conn: &mut PgConnection, images: &[PropertyImage]) -> Result<(), sqlx::Error> {
    for (position, image) in images.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO property_images (
                id, property_id, image_url, image_public_id,
                display_order, position, is_primary, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(image.id.as_uuid())
        .bind(image.property_id.as_uuid())
        .bind(&image.url)
        .bind(image.public_id.as_str())
        .bind(image.display_order)
        .bind(position as i32)
        .bind(image.is_primary)
        .bind(image.created_at)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

fn room_count(field: &'static str, value: u32) -> RepositoryResult<i32> {
    i32::try_from(value).map_err(|e| RepositoryError::Infrastructure {
        message: format!("{} out of range: {}", field, value),
        source: Some(e.to_string()),
    })
}

fn public_ids_from_rows(rows: &[PgRow]) -> Result<Vec<PublicId>, sqlx::Error> {
    rows.iter()
        .map(|row| {
            row.try_get::<String, _>("image_public_id")
                .map(PublicId::from_stored)
        })
        .collect()
}

#[async_trait]
impl PropertyRepository for SqlPropertyRepository {
    async fn create_property_with_images(&self, property: &Property) -> RepositoryResult<()> {
        let bedrooms = room_count("bedrooms", property.details.bedrooms)?;
        let bathrooms = room_count("bathrooms", property.details.bathrooms)?;
        let mut tx = self.pool.begin().await.map_err(db_error("opening transaction"))?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO properties (
                id, agent_id, title, description, address,
                rental_amount, bedrooms, bathrooms, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(property.id.as_uuid())
        .bind(property.agent_id.value())
        .bind(&property.details.title)
        .bind(&property.details.description)
        .bind(&property.details.address)
        .bind(&property.details.rental_amount)
        .bind(bedrooms)
        .bind(bathrooms)
        .bind(property.created_at)
        .bind(property.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(db_error("inserting property"))?;

        if inserted.rows_affected() == 0 {
            return Err(RepositoryError::DuplicateProperty { id: property.id });
        }

        insert_images(&mut tx, &property.images)
            .await
            .map_err(db_error("inserting images"))?;

        tx.commit().await.map_err(db_error("committing property"))?;
        Ok(())
    }

    async fn get_property(&self, id: &PropertyId) -> RepositoryResult<Option<Property>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM properties WHERE id = $1",
            PROPERTY_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("retrieving property"))?;

        Ok(self.hydrate(rows).await?.into_iter().next())
    }

    async fn list_properties(&self) -> RepositoryResult<Vec<Property>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM properties ORDER BY created_at",
            PROPERTY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing properties"))?;

        self.hydrate(rows).await
    }

    async fn list_properties_by_agent(&self, agent_id: AgentId) -> RepositoryResult<Vec<Property>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM properties WHERE agent_id = $1 ORDER BY created_at DESC",
            PROPERTY_COLUMNS
        ))
        .bind(agent_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing agent properties"))?;

        self.hydrate(rows).await
    }

    async fn update_details(
        &self,
        id: &PropertyId,
        details: &PropertyDetails,
    ) -> RepositoryResult<Property> {
        let bedrooms = room_count("bedrooms", details.bedrooms)?;
        let bathrooms = room_count("bathrooms", details.bathrooms)?;
        let updated = sqlx::query(
            r#"
            UPDATE properties
            SET title = $2, description = $3, address = $4, rental_amount = $5,
                bedrooms = $6, bathrooms = $7, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(&details.title)
        .bind(&details.description)
        .bind(&details.address)
        .bind(&details.rental_amount)
        .bind(bedrooms)
        .bind(bathrooms)
        .execute(&self.pool)
        .await
        .map_err(db_error("updating property"))?;

        if updated.rows_affected() == 0 {
            return Err(RepositoryError::PropertyNotFound { id: *id });
        }

        self.get_property(id)
            .await?
            .ok_or(RepositoryError::PropertyNotFound { id: *id })
    }

    async fn replace_image_set(
        &self,
        id: &PropertyId,
        details: &PropertyDetails,
        images: &[PropertyImage],
    ) -> RepositoryResult<Vec<PublicId>> {
        let bedrooms = room_count("bedrooms", details.bedrooms)?;
        let bathrooms = room_count("bathrooms", details.bathrooms)?;
        let mut tx = self.pool.begin().await.map_err(db_error("opening transaction"))?;

        let updated = sqlx::query(
            r#"
            UPDATE properties
            SET title = $2, description = $3, address = $4, rental_amount = $5,
                bedrooms = $6, bathrooms = $7, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(&details.title)
        .bind(&details.description)
        .bind(&details.address)
        .bind(&details.rental_amount)
        .bind(bedrooms)
        .bind(bathrooms)
        .execute(&mut *tx)
        .await
        .map_err(db_error("updating property"))?;

        if updated.rows_affected() == 0 {
            return Err(RepositoryError::PropertyNotFound { id: *id });
        }

        let removed = sqlx::query(
            "DELETE FROM property_images WHERE property_id = $1 RETURNING image_public_id",
        )
        .bind(id.as_uuid())
        .fetch_all(&mut *tx)
        .await
        .map_err(db_error("removing images"))?;

        // Decode before committing so a decode failure rolls the swap back
        let displaced = public_ids_from_rows(&removed).map_err(db_error("decoding public ids"))?;

        insert_images(&mut tx, images)
            .await
            .map_err(db_error("inserting images"))?;

        tx.commit().await.map_err(db_error("committing image set"))?;

        Ok(displaced)
    }

    async fn delete_property(&self, id: &PropertyId) -> RepositoryResult<Option<Vec<PublicId>>> {
        let mut tx = self.pool.begin().await.map_err(db_error("opening transaction"))?;

        let image_rows = sqlx::query(
            "SELECT image_public_id FROM property_images WHERE property_id = $1 FOR UPDATE",
        )
        .bind(id.as_uuid())
        .fetch_all(&mut *tx)
        .await
        .map_err(db_error("capturing image ids"))?;
        let public_ids = public_ids_from_rows(&image_rows).map_err(db_error("decoding public ids"))?;

        // Image rows go with the property through ON DELETE CASCADE
        let deleted = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(db_error("deleting property"))?;

        if deleted.rows_affected() == 0 {
            tx.rollback().await.map_err(db_error("rolling back"))?;
            return Ok(None);
        }

        tx.commit().await.map_err(db_error("committing delete"))?;

        Ok(Some(public_ids))
    }
}
