use crate::models::{Garment, GarmentId};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when loading garments
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid row: {0}")]
    InvalidRow(String),
}

/// Read-only access to users' wardrobes
///
/// Every lookup is scoped to the owning user.
#[async_trait]
pub trait GarmentRepository: Send + Sync {
    /// A single garment owned by `user_id`
    async fn get_item(&self, user_id: i64, item_id: GarmentId) -> Result<Garment, RepositoryError>;

    /// All of a user's garments, newest first
    async fn list_items(&self, user_id: i64) -> Result<Vec<Garment>, RepositoryError>;

    /// A user's garments except `item_id`, newest first
    async fn list_items_excluding(
        &self,
        user_id: i64,
        item_id: GarmentId,
    ) -> Result<Vec<Garment>, RepositoryError>;

    async fn health_check(&self) -> Result<bool, RepositoryError>;
}
