use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::Garment;

/// Request to recommend pairings for an item against a supplied wardrobe
///
/// The wardrobe is taken as given: the caller excludes the item itself.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(nested)]
    pub item: Garment,
    #[serde(default)]
    #[validate(nested)]
    pub wardrobe: Vec<Garment>,
}
