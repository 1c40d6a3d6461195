use serde::{Deserialize, Serialize};
use crate::core::insights::{Insight, WardrobeStats};
use crate::models::domain::{Garment, RecommendationResult};

/// Response for the stored-item recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRecommendationsResponse {
    pub item: Garment,
    pub recommendations: RecommendationResult,
}

/// Response for the wardrobe insights endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsResponse {
    pub user_id: i64,
    pub insights: Vec<Insight>,
    pub stats: WardrobeStats,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
