use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

pub type GarmentId = i64;

/// Garment category, a closed set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Tops,
    Bottoms,
    Outerwear,
    Shoes,
    Accessories,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Tops,
        Category::Bottoms,
        Category::Outerwear,
        Category::Shoes,
        Category::Accessories,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tops => "Tops",
            Category::Bottoms => "Bottoms",
            Category::Outerwear => "Outerwear",
            Category::Shoes => "Shoes",
            Category::Accessories => "Accessories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown garment category `{}`", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A single wardrobe item, read-only to the recommendation engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Garment {
    pub id: GarmentId,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub category: Category,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub color: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub brand: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub wear_count: u32,
    #[serde(default)]
    pub last_worn: Option<NaiveDate>,
}

impl Garment {
    /// Lowercased name plus space-joined tags, the text the keyword scans run over
    pub fn search_text(&self) -> String {
        format!("{} {}", self.name, self.tags.join(" ")).to_lowercase()
    }
}

/// A wardrobe garment that pairs well with the target item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    pub id: GarmentId,
    pub name: String,
    pub category: Category,
    pub color: String,
    pub brand: String,
    pub image_url: String,
    pub compatibility_score: f64,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleTag {
    Casual,
    Formal,
    Trendy,
    Classic,
    Versatile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormalityLevel {
    Formal,
    Casual,
    SmartCasual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
    AllSeason,
}

/// Style characteristics derived from a garment's text fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleProfile {
    pub primary_style: StyleTag,
    pub style_tags: Vec<StyleTag>,
    pub formality_level: FormalityLevel,
    pub versatility_score: f64,
    pub seasonal_suitability: Vec<Season>,
}

impl StyleProfile {
    /// Profile used when the recommendation pipeline fails
    pub fn fallback() -> Self {
        Self {
            primary_style: StyleTag::Versatile,
            style_tags: vec![StyleTag::Classic],
            formality_level: FormalityLevel::SmartCasual,
            versatility_score: 0.7,
            seasonal_suitability: vec![Season::AllSeason],
        }
    }
}

/// A product worth buying to go with the target item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingSuggestion {
    pub name: String,
    pub category: String,
    pub colors: Vec<String>,
    pub price_range: String,
    pub price: f64,
    pub reason: String,
    pub style: String,
    pub image_url: String,
    pub store: String,
    pub link: String,
}

/// Full recommendation payload for one wardrobe item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub item_id: GarmentId,
    pub item_name: String,
    pub style_analysis: StyleProfile,
    pub existing_matches: Vec<CompatibilityResult>,
    pub shopping_suggestions: Vec<ShoppingSuggestion>,
    pub confidence_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_text() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
        assert!("Hats".parse::<Category>().is_err());
        assert!("tops".parse::<Category>().is_err());
    }

    #[test]
    fn test_enum_spellings() {
        assert_eq!(
            serde_json::to_string(&FormalityLevel::SmartCasual).unwrap(),
            "\"smart-casual\""
        );
        assert_eq!(serde_json::to_string(&Season::AllSeason).unwrap(), "\"all-season\"");
        assert_eq!(serde_json::to_string(&StyleTag::Versatile).unwrap(), "\"versatile\"");
        assert_eq!(serde_json::to_string(&Category::Outerwear).unwrap(), "\"Outerwear\"");
    }

    #[test]
    fn test_garment_defaults_optional_fields() {
        let garment: Garment = serde_json::from_str(
            r#"{"id": 7, "name": "Linen Shirt", "category": "Tops"}"#,
        )
        .unwrap();

        assert_eq!(garment.color, "");
        assert!(garment.tags.is_empty());
        assert_eq!(garment.wear_count, 0);
        assert_eq!(garment.price, None);
    }

    #[test]
    fn test_search_text_is_lowercased() {
        let garment = Garment {
            id: 1,
            name: "Wool Coat".to_string(),
            category: Category::Outerwear,
            color: "Camel".to_string(),
            brand: String::new(),
            tags: vec!["Classic".to_string(), "Warm".to_string()],
            image_url: String::new(),
            price: None,
            wear_count: 0,
            last_worn: None,
        };

        assert_eq!(garment.search_text(), "wool coat classic warm");
    }
}
