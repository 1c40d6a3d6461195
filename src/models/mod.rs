// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Category, CompatibilityResult, FormalityLevel, Garment, GarmentId, RecommendationResult,
    Season, ShoppingSuggestion, StyleProfile, StyleTag, UnknownCategory,
};
pub use requests::RecommendRequest;
pub use responses::{ErrorResponse, HealthResponse, InsightsResponse, ItemRecommendationsResponse};
