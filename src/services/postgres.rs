use crate::models::{Category, Garment, GarmentId};
use crate::services::repository::{GarmentRepository, RepositoryError};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::time::Duration;

const SELECT_GARMENTS: &str = r#"
    SELECT id::int8 AS id, name, category, color, brand, price::float8 AS price,
           image_url, tags, wear_count::int4 AS wear_count, last_worn
    FROM wardrobe_wardrobeitem
"#;

/// PostgreSQL-backed wardrobe reader
///
/// Reads the existing wardrobe item table; the schema is owned and migrated
/// elsewhere, so this client never writes or migrates.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout_secs: u64,
    ) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a client from an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_garments(
        &self,
        user_id: i64,
        exclude: Option<GarmentId>,
    ) -> Result<Vec<Garment>, RepositoryError> {
        let query = format!(
            "{} WHERE user_id = $1 AND ($2::int8 IS NULL OR id <> $2) ORDER BY created_at DESC",
            SELECT_GARMENTS
        );

        let rows = sqlx::query(&query)
            .bind(user_id)
            .bind(exclude)
            .fetch_all(&self.pool)
            .await?;

        let garments: Vec<Garment> = rows.iter().filter_map(garment_from_row).collect();

        tracing::debug!(
            "User {} has {} garments (of {} rows)",
            user_id,
            garments.len(),
            rows.len()
        );

        Ok(garments)
    }
}

#[async_trait]
impl GarmentRepository for PostgresClient {
    async fn get_item(&self, user_id: i64, item_id: GarmentId) -> Result<Garment, RepositoryError> {
        let query = format!("{} WHERE user_id = $1 AND id = $2", SELECT_GARMENTS);

        let row = sqlx::query(&query)
            .bind(user_id)
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref()
            .and_then(garment_from_row)
            .ok_or_else(|| {
                RepositoryError::NotFound(format!("Item {} not found for user {}", item_id, user_id))
            })
    }

    async fn list_items(&self, user_id: i64) -> Result<Vec<Garment>, RepositoryError> {
        self.fetch_garments(user_id, None).await
    }

    async fn list_items_excluding(
        &self,
        user_id: i64,
        item_id: GarmentId,
    ) -> Result<Vec<Garment>, RepositoryError> {
        self.fetch_garments(user_id, Some(item_id)).await
    }

    /// Health check for the database connection
    async fn health_check(&self) -> Result<bool, RepositoryError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

/// Map a row to a garment, skipping rows that do not decode cleanly
fn garment_from_row(row: &PgRow) -> Option<Garment> {
    let decoded = GarmentRow::decode(row)
        .map_err(RepositoryError::from)
        .and_then(Garment::try_from);

    match decoded {
        Ok(garment) => Some(garment),
        Err(e) => {
            let id = row.try_get::<GarmentId, _>("id").ok();
            tracing::warn!("Skipping garment {:?}: {}", id, e);
            None
        }
    }
}

/// Column values as stored, before domain checks
#[derive(Debug, Clone)]
struct GarmentRow {
    id: GarmentId,
    name: String,
    category: String,
    color: String,
    brand: String,
    tags: serde_json::Value,
    image_url: String,
    price: Option<f64>,
    wear_count: i32,
    last_worn: Option<NaiveDate>,
}

impl GarmentRow {
    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            category: row.try_get("category")?,
            color: row.try_get("color")?,
            brand: row.try_get("brand")?,
            tags: row.try_get::<Json<serde_json::Value>, _>("tags")?.0,
            image_url: row.try_get("image_url")?,
            price: row.try_get("price")?,
            wear_count: row.try_get("wear_count")?,
            last_worn: row.try_get("last_worn")?,
        })
    }
}

impl TryFrom<GarmentRow> for Garment {
    type Error = RepositoryError;

    fn try_from(row: GarmentRow) -> Result<Self, Self::Error> {
        let category = row
            .category
            .parse::<Category>()
            .map_err(|e| RepositoryError::InvalidRow(e.to_string()))?;

        let tags: Vec<String> = serde_json::from_value(row.tags)
            .map_err(|e| RepositoryError::InvalidRow(format!("tags are not a list of strings: {}", e)))?;

        let wear_count = u32::try_from(row.wear_count)
            .map_err(|_| RepositoryError::InvalidRow(format!("negative wear count {}", row.wear_count)))?;

        Ok(Garment {
            id: row.id,
            name: row.name,
            category,
            color: row.color,
            brand: row.brand,
            tags,
            image_url: row.image_url,
            price: row.price,
            wear_count,
            last_worn: row.last_worn,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stored_row(category: &str, tags: serde_json::Value, wear_count: i32) -> GarmentRow {
        GarmentRow {
            id: 42,
            name: "Linen Shirt".to_string(),
            category: category.to_string(),
            color: "white".to_string(),
            brand: String::new(),
            tags,
            image_url: "https://img.test/42.jpg".to_string(),
            price: Some(39.5),
            wear_count,
            last_worn: None,
        }
    }

    #[test]
    fn test_row_converts_to_garment() {
        let garment = Garment::try_from(stored_row("Tops", json!(["summer", "casual"]), 4)).unwrap();

        assert_eq!(garment.category, Category::Tops);
        assert_eq!(garment.tags, vec!["summer", "casual"]);
        assert_eq!(garment.wear_count, 4);
        assert_eq!(garment.price, Some(39.5));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let err = Garment::try_from(stored_row("Capes", json!([]), 0)).unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidRow(_)));
    }

    #[test]
    fn test_undecodable_tags_are_rejected_not_emptied() {
        for tags in [json!("casual"), json!({"style": "casual"}), json!([1, 2])] {
            let err = Garment::try_from(stored_row("Tops", tags, 0)).unwrap_err();
            assert!(matches!(err, RepositoryError::InvalidRow(_)));
        }
    }

    #[test]
    fn test_negative_wear_count_is_rejected() {
        let err = Garment::try_from(stored_row("Shoes", json!([]), -1)).unwrap_err();
        assert!(err.to_string().contains("negative wear count"));
    }
}
