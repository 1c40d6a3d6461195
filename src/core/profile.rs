use crate::models::{Category, FormalityLevel, Garment, Season, StyleProfile, StyleTag};

const STYLE_KEYWORDS: [(StyleTag, &[&str]); 4] = [
    (StyleTag::Casual, &["casual", "relaxed", "comfortable", "everyday"]),
    (StyleTag::Formal, &["formal", "dress", "business", "professional"]),
    (StyleTag::Trendy, &["trendy", "fashion", "modern", "contemporary"]),
    (StyleTag::Classic, &["classic", "timeless", "traditional", "elegant"]),
];

const FORMAL_INDICATORS: [&str; 5] = ["suit", "dress", "blazer", "formal", "business"];
const CASUAL_INDICATORS: [&str; 5] = ["jeans", "casual", "t-shirt", "sneakers", "hoodie"];

const VERSATILE_COLORS: [&str; 5] = ["black", "white", "navy", "gray", "beige"];
const VERSATILE_CATEGORIES: [Category; 2] = [Category::Tops, Category::Bottoms];

const SEASON_KEYWORDS: [(Season, &[&str]); 4] = [
    (Season::Spring, &["light", "cotton", "spring"]),
    (Season::Summer, &["summer", "shorts", "tank", "sandals", "light"]),
    (Season::Fall, &["fall", "autumn", "jacket", "boots"]),
    (Season::Winter, &["winter", "coat", "warm", "wool", "heavy"]),
];

#[inline]
fn mentions_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Derive the style profile of a garment from its name and tags
///
/// Every keyword scan is a substring search over the lowercased
/// "name tags..." text, so the profile is fully recomputable from the
/// garment alone.
pub fn analyze_style(item: &Garment) -> StyleProfile {
    let text = item.search_text();

    let mut style_tags: Vec<StyleTag> = STYLE_KEYWORDS
        .iter()
        .filter(|(_, keywords)| mentions_any(&text, keywords))
        .map(|(style, _)| *style)
        .collect();

    if style_tags.is_empty() {
        style_tags.push(StyleTag::Versatile);
    }

    StyleProfile {
        primary_style: style_tags[0],
        style_tags,
        formality_level: formality_of(&text),
        versatility_score: calculate_versatility(item),
        seasonal_suitability: seasons_of(&text),
    }
}

/// Formal indicators win over casual ones; neither means smart-casual
pub fn determine_formality(item: &Garment) -> FormalityLevel {
    formality_of(&item.search_text())
}

fn formality_of(text: &str) -> FormalityLevel {
    if mentions_any(text, &FORMAL_INDICATORS) {
        FormalityLevel::Formal
    } else if mentions_any(text, &CASUAL_INDICATORS) {
        FormalityLevel::Casual
    } else {
        FormalityLevel::SmartCasual
    }
}

/// How many outfits a garment can slot into (0-1)
pub fn calculate_versatility(item: &Garment) -> f64 {
    // Tenths: base 5, +3 for a versatile color, +2 for a core category
    let mut points = 5u8;

    if VERSATILE_COLORS.contains(&item.color.to_lowercase().as_str()) {
        points += 3;
    }

    if VERSATILE_CATEGORIES.contains(&item.category) {
        points += 2;
    }

    f64::from(points.min(10)) / 10.0
}

/// Seasons the garment suits; never empty
pub fn determine_seasonality(item: &Garment) -> Vec<Season> {
    seasons_of(&item.search_text())
}

fn seasons_of(text: &str) -> Vec<Season> {
    let seasons: Vec<Season> = SEASON_KEYWORDS
        .iter()
        .filter(|(_, keywords)| mentions_any(text, keywords))
        .map(|(season, _)| *season)
        .collect();

    if seasons.is_empty() {
        vec![Season::AllSeason]
    } else {
        seasons
    }
}
