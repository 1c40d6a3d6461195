use crate::models::{Category, Garment, GarmentId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Garments worn fewer times than this are considered underused
pub const UNDERUSED_WEAR_COUNT: u32 = 3;
/// Maximum underused garments listed
pub const UNDERUSED_LIMIT: usize = 5;
/// Wardrobes with fewer distinct colors get a variety nudge
pub const MIN_DISTINCT_COLORS: usize = 5;
/// Length of the ranked lists in wardrobe stats
pub const STATS_TOP_N: usize = 10;

/// Short reference to a garment inside an insight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarmentRef {
    pub id: GarmentId,
    pub name: String,
    pub category: Category,
    pub wear_count: u32,
}

impl From<&Garment> for GarmentRef {
    fn from(garment: &Garment) -> Self {
        Self {
            id: garment.id,
            name: garment.name.clone(),
            category: garment.category,
            wear_count: garment.wear_count,
        }
    }
}

/// A wardrobe-level suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Insight {
    WearMore {
        title: String,
        description: String,
        items: Vec<GarmentRef>,
    },
    CategoryGap {
        title: String,
        description: String,
        categories: Vec<Category>,
    },
    ColorVariety {
        title: String,
        description: String,
        distinct_colors: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
    /// Sum of known prices
    pub total_value: f64,
    pub avg_wear: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorCount {
    pub color: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandCount {
    pub brand: String,
    pub count: usize,
    pub total_value: f64,
}

/// Item counts per price band, over garments with a known price
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceBuckets {
    pub under_50: usize,
    #[serde(rename = "50_to_100")]
    pub from_50_to_100: usize,
    #[serde(rename = "100_to_200")]
    pub from_100_to_200: usize,
    pub over_200: usize,
}

/// Aggregate numbers about a wardrobe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WardrobeStats {
    pub total_items: usize,
    pub total_value: f64,
    pub avg_wear_count: f64,
    pub categories: Vec<CategoryCount>,
    /// Most common colors, at most `STATS_TOP_N`
    pub colors: Vec<ColorCount>,
    /// Most common non-empty brands, at most `STATS_TOP_N`
    pub brands: Vec<BrandCount>,
    pub most_worn: Vec<GarmentRef>,
    /// Garments under `UNDERUSED_WEAR_COUNT` wears, at most `STATS_TOP_N`
    pub least_worn: Vec<GarmentRef>,
    pub price_ranges: PriceBuckets,
}

/// Build every insight that applies to the wardrobe, in a fixed order
pub fn wardrobe_insights(wardrobe: &[Garment]) -> Vec<Insight> {
    [wear_more(wardrobe), category_gap(wardrobe), color_variety(wardrobe)]
        .into_iter()
        .flatten()
        .collect()
}

/// Underused garments, in wardrobe order
pub fn wear_more(wardrobe: &[Garment]) -> Option<Insight> {
    let items: Vec<GarmentRef> = wardrobe
        .iter()
        .filter(|g| g.wear_count < UNDERUSED_WEAR_COUNT)
        .take(UNDERUSED_LIMIT)
        .map(GarmentRef::from)
        .collect();

    if items.is_empty() {
        return None;
    }

    Some(Insight::WearMore {
        title: "Items to Wear More".to_string(),
        description: "These items in your wardrobe could use more love!".to_string(),
        items,
    })
}

/// Categories the wardrobe has nothing in
pub fn category_gap(wardrobe: &[Garment]) -> Option<Insight> {
    let present: HashSet<Category> = wardrobe.iter().map(|g| g.category).collect();
    let missing: Vec<Category> = Category::ALL
        .into_iter()
        .filter(|c| !present.contains(c))
        .collect();

    if missing.is_empty() {
        return None;
    }

    let names: Vec<&str> = missing.iter().map(Category::as_str).collect();

    Some(Insight::CategoryGap {
        title: "Complete Your Wardrobe".to_string(),
        description: format!("Consider adding {} to your collection.", names.join(", ")),
        categories: missing,
    })
}

pub fn color_variety(wardrobe: &[Garment]) -> Option<Insight> {
    let distinct_colors = wardrobe
        .iter()
        .map(|g| g.color.as_str())
        .collect::<HashSet<_>>()
        .len();

    if distinct_colors >= MIN_DISTINCT_COLORS {
        return None;
    }

    Some(Insight::ColorVariety {
        title: "Add Color Variety".to_string(),
        description: "Adding more colors could increase your outfit possibilities.".to_string(),
        distinct_colors,
    })
}

/// Aggregate counts, values and wear patterns
///
/// Ranked lists are sorted by count (or wear) descending; ties keep the
/// order in which they first appear in the wardrobe.
pub fn wardrobe_stats(wardrobe: &[Garment]) -> WardrobeStats {
    let total_items = wardrobe.len();
    let total_value = known_value(wardrobe.iter());
    let avg_wear_count = average_wear(wardrobe.iter());

    let mut categories: Vec<CategoryCount> = Category::ALL
        .into_iter()
        .filter_map(|category| {
            let items: Vec<&Garment> = wardrobe.iter().filter(|g| g.category == category).collect();
            (!items.is_empty()).then(|| CategoryCount {
                category,
                count: items.len(),
                total_value: known_value(items.iter().copied()),
                avg_wear: average_wear(items.iter().copied()),
            })
        })
        .collect();
    // Stable, so equal counts stay in category order
    categories.sort_by(|a, b| b.count.cmp(&a.count));

    let colors = tally(wardrobe.iter(), |g| Some(g.color.as_str()))
        .into_iter()
        .map(|(color, items)| ColorCount {
            color: color.to_string(),
            count: items.len(),
        })
        .collect();

    let brands = tally(wardrobe.iter(), |g| Some(g.brand.as_str()).filter(|b| !b.is_empty()))
        .into_iter()
        .map(|(brand, items)| BrandCount {
            brand: brand.to_string(),
            count: items.len(),
            total_value: known_value(items.into_iter()),
        })
        .collect();

    let mut by_wear: Vec<&Garment> = wardrobe.iter().collect();
    by_wear.sort_by(|a, b| b.wear_count.cmp(&a.wear_count));
    let most_worn = by_wear
        .into_iter()
        .take(STATS_TOP_N)
        .map(GarmentRef::from)
        .collect();

    let least_worn = wardrobe
        .iter()
        .filter(|g| g.wear_count < UNDERUSED_WEAR_COUNT)
        .take(STATS_TOP_N)
        .map(GarmentRef::from)
        .collect();

    let mut price_ranges = PriceBuckets::default();
    for price in wardrobe.iter().filter_map(|g| g.price) {
        if price < 50.0 {
            price_ranges.under_50 += 1;
        } else if price < 100.0 {
            price_ranges.from_50_to_100 += 1;
        } else if price < 200.0 {
            price_ranges.from_100_to_200 += 1;
        } else {
            price_ranges.over_200 += 1;
        }
    }

    WardrobeStats {
        total_items,
        total_value,
        avg_wear_count,
        categories,
        colors,
        brands,
        most_worn,
        least_worn,
        price_ranges,
    }
}

fn known_value<'a>(items: impl Iterator<Item = &'a Garment>) -> f64 {
    items.filter_map(|g| g.price).sum()
}

fn average_wear<'a>(items: impl Iterator<Item = &'a Garment>) -> f64 {
    let (count, wears) = items.fold((0usize, 0f64), |(count, wears), g| {
        (count + 1, wears + f64::from(g.wear_count))
    });

    if count == 0 {
        0.0
    } else {
        wears / count as f64
    }
}

/// Group garments by key, largest groups first, capped at `STATS_TOP_N`
fn tally<'a, F>(items: impl Iterator<Item = &'a Garment>, key: F) -> Vec<(&'a str, Vec<&'a Garment>)>
where
    F: Fn(&'a Garment) -> Option<&'a str>,
{
    let mut groups: Vec<(&'a str, Vec<&'a Garment>)> = Vec::new();

    for garment in items {
        let Some(k) = key(garment) else { continue };
        match groups.iter_mut().find(|(existing, _)| *existing == k) {
            Some((_, members)) => members.push(garment),
            None => groups.push((k, vec![garment])),
        }
    }

    groups.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    groups.truncate(STATS_TOP_N);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn garment(id: i64, category: Category, color: &str, wear_count: u32, price: Option<f64>) -> Garment {
        Garment {
            id,
            name: format!("Item {}", id),
            category,
            color: color.to_string(),
            brand: String::new(),
            tags: vec![],
            image_url: String::new(),
            price,
            wear_count,
            last_worn: None,
        }
    }

    #[test]
    fn test_empty_wardrobe() {
        let insights = wardrobe_insights(&[]);

        assert_eq!(insights.len(), 2);
        match &insights[0] {
            Insight::CategoryGap { categories, .. } => assert_eq!(categories, &Category::ALL.to_vec()),
            other => panic!("unexpected insight: {:?}", other),
        }
        assert!(matches!(insights[1], Insight::ColorVariety { distinct_colors: 0, .. }));

        let stats = wardrobe_stats(&[]);
        assert_eq!(stats.total_items, 0);
        assert_eq!(stats.avg_wear_count, 0.0);
        assert!(stats.categories.is_empty());
        assert!(stats.colors.is_empty());
        assert!(stats.brands.is_empty());
        assert!(stats.most_worn.is_empty());
    }

    #[test]
    fn test_wear_more_caps_and_keeps_order() {
        let wardrobe: Vec<Garment> = (1..=8)
            .map(|i| garment(i, Category::Tops, "white", if i == 2 { 10 } else { 0 }, None))
            .collect();

        match wear_more(&wardrobe) {
            Some(Insight::WearMore { items, .. }) => {
                let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
                assert_eq!(ids, vec![1, 3, 4, 5, 6]);
            }
            other => panic!("unexpected insight: {:?}", other),
        }
    }

    #[test]
    fn test_full_wardrobe_has_no_gap_or_color_nudge() {
        let colors = ["white", "black", "red", "green", "blue"];
        let wardrobe: Vec<Garment> = Category::ALL
            .into_iter()
            .zip(colors)
            .enumerate()
            .map(|(i, (category, color))| garment(i as i64, category, color, 5, None))
            .collect();

        assert!(wardrobe_insights(&wardrobe).is_empty());
    }

    #[test]
    fn test_category_gap_description() {
        let wardrobe = vec![
            garment(1, Category::Tops, "white", 0, None),
            garment(2, Category::Bottoms, "blue", 0, None),
        ];

        match category_gap(&wardrobe) {
            Some(Insight::CategoryGap { description, .. }) => assert_eq!(
                description,
                "Consider adding Outerwear, Shoes, Accessories to your collection."
            ),
            other => panic!("unexpected insight: {:?}", other),
        }
    }

    #[test]
    fn test_stats() {
        let mut wardrobe = vec![
            garment(1, Category::Shoes, "black", 4, Some(120.0)),
            garment(2, Category::Tops, "white", 2, Some(30.0)),
            garment(3, Category::Tops, "blue", 0, None),
            garment(4, Category::Bottoms, "blue", 6, Some(250.0)),
        ];
        wardrobe[0].brand = "Cos".to_string();
        wardrobe[1].brand = "Cos".to_string();
        wardrobe[3].brand = "Arket".to_string();

        let stats = wardrobe_stats(&wardrobe);

        assert_eq!(stats.total_items, 4);
        assert_eq!(stats.total_value, 400.0);
        assert_eq!(stats.avg_wear_count, 3.0);
        assert_eq!(
            stats.categories,
            vec![
                CategoryCount { category: Category::Tops, count: 2, total_value: 30.0, avg_wear: 1.0 },
                CategoryCount { category: Category::Bottoms, count: 1, total_value: 250.0, avg_wear: 6.0 },
                CategoryCount { category: Category::Shoes, count: 1, total_value: 120.0, avg_wear: 4.0 },
            ]
        );
        assert_eq!(
            stats.colors,
            vec![
                ColorCount { color: "blue".to_string(), count: 2 },
                ColorCount { color: "black".to_string(), count: 1 },
                ColorCount { color: "white".to_string(), count: 1 },
            ]
        );
        // Garment 3 has no brand and is left out
        assert_eq!(
            stats.brands,
            vec![
                BrandCount { brand: "Cos".to_string(), count: 2, total_value: 150.0 },
                BrandCount { brand: "Arket".to_string(), count: 1, total_value: 250.0 },
            ]
        );
        let most_worn: Vec<i64> = stats.most_worn.iter().map(|g| g.id).collect();
        assert_eq!(most_worn, vec![4, 1, 2, 3]);
        let least_worn: Vec<i64> = stats.least_worn.iter().map(|g| g.id).collect();
        assert_eq!(least_worn, vec![2, 3]);
        assert_eq!(
            stats.price_ranges,
            PriceBuckets { under_50: 1, from_50_to_100: 0, from_100_to_200: 1, over_200: 1 }
        );
    }

    #[test]
    fn test_ranked_lists_are_capped() {
        let wardrobe: Vec<Garment> = (0..15)
            .map(|i| {
                let mut g = garment(i, Category::Accessories, &format!("color {}", i), i as u32 % 2, None);
                g.brand = format!("Brand {}", i);
                g
            })
            .collect();

        let stats = wardrobe_stats(&wardrobe);

        assert_eq!(stats.colors.len(), STATS_TOP_N);
        assert_eq!(stats.brands.len(), STATS_TOP_N);
        assert_eq!(stats.most_worn.len(), STATS_TOP_N);
        assert_eq!(stats.least_worn.len(), STATS_TOP_N);
        // All singletons, so first appearance decides
        assert_eq!(stats.colors[0].color, "color 0");
        assert_eq!(stats.most_worn[0].id, 1);
    }

    #[test]
    fn test_insight_serialization_is_tagged() {
        let json = serde_json::to_value(color_variety(&[]).unwrap()).unwrap();
        assert_eq!(json["type"], "color_variety");
    }
}
