use crate::models::{Category, Garment};

/// Colors that go with everything
const NEUTRAL_COLORS: [&str; 7] = ["white", "black", "gray", "grey", "beige", "cream", "navy"];

/// Color pairs that complement each other, matched by substring
const COMPLEMENTARY_PAIRS: [(&str, &str); 6] = [
    ("blue", "white"),
    ("black", "white"),
    ("navy", "white"),
    ("red", "black"),
    ("blue", "denim"),
    ("brown", "cream"),
];

// Contributions are kept in tenths so sums stay exact
const COLOR_POINTS: u8 = 3;
const CATEGORY_POINTS: u8 = 4;
const STYLE_POINTS: u8 = 3;
const MAX_POINTS: u8 = 10;

/// Calculate a compatibility score (0-1) between two garments
///
/// Scoring formula:
/// score = (
///     0.3 if colors match +
///     0.4 if category(a) pairs with category(b) +
///     0.3 if tags overlap or brands are equal
/// )
///
/// The category table is directed, so `calculate_compatibility(a, b)` and
/// `calculate_compatibility(b, a)` may differ.
pub fn calculate_compatibility(item: &Garment, other: &Garment) -> f64 {
    let mut points = 0u8;

    if colors_match(&item.color, &other.color) {
        points += COLOR_POINTS;
    }

    if categories_compatible(item.category, other.category) {
        points += CATEGORY_POINTS;
    }

    if styles_compatible(item, other) {
        points += STYLE_POINTS;
    }

    f64::from(points.min(MAX_POINTS)) / 10.0
}

/// Check whether two colors work together
///
/// Identical colors (case-insensitive) match, neutrals match anything, and
/// the complementary pairs match when each color and its pair member
/// contain one another as substrings. "light blue" pairs with "denim",
/// and so does "bluebell".
pub fn colors_match(color1: &str, color2: &str) -> bool {
    let c1 = color1.to_lowercase();
    let c2 = color2.to_lowercase();

    if c1 == c2 {
        return true;
    }

    if NEUTRAL_COLORS.contains(&c1.as_str()) || NEUTRAL_COLORS.contains(&c2.as_str()) {
        return true;
    }

    COMPLEMENTARY_PAIRS.iter().any(|(first, second)| {
        (overlaps(&c1, first) && overlaps(&c2, second))
            || (overlaps(&c1, second) && overlaps(&c2, first))
    })
}

#[inline]
fn overlaps(color: &str, pair_member: &str) -> bool {
    color.contains(pair_member) || pair_member.contains(color)
}

/// Categories that pair well with `category`, as a directed table
pub fn compatible_categories(category: Category) -> &'static [Category] {
    match category {
        Category::Tops => &[Category::Bottoms, Category::Outerwear, Category::Accessories],
        Category::Bottoms => &[Category::Tops, Category::Shoes, Category::Accessories],
        Category::Outerwear => &[Category::Tops, Category::Bottoms, Category::Accessories],
        Category::Shoes => &[Category::Bottoms, Category::Accessories],
        Category::Accessories => &[
            Category::Tops,
            Category::Bottoms,
            Category::Outerwear,
            Category::Shoes,
        ],
    }
}

#[inline]
pub fn categories_compatible(from: Category, to: Category) -> bool {
    compatible_categories(from).contains(&to)
}

/// Tags present on both garments, in the order they appear on `item`
pub fn shared_tags<'a>(item: &'a Garment, other: &Garment) -> Vec<&'a str> {
    let mut shared: Vec<&str> = Vec::new();
    for tag in &item.tags {
        if other.tags.contains(tag) && !shared.contains(&tag.as_str()) {
            shared.push(tag);
        }
    }
    shared
}

/// Same non-empty brand
#[inline]
pub fn same_brand(item: &Garment, other: &Garment) -> bool {
    !item.brand.is_empty() && item.brand == other.brand
}

#[inline]
pub fn styles_compatible(item: &Garment, other: &Garment) -> bool {
    !shared_tags(item, other).is_empty() || same_brand(item, other)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn garment(category: Category, color: &str, brand: &str, tags: &[&str]) -> Garment {
        Garment {
            id: 1,
            name: "Test Item".to_string(),
            category,
            color: color.to_string(),
            brand: brand.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            image_url: String::new(),
            price: None,
            wear_count: 0,
            last_worn: None,
        }
    }

    #[test]
    fn test_neutral_white_top_with_black_bottoms() {
        let top = garment(Category::Tops, "white", "", &[]);
        let bottoms = garment(Category::Bottoms, "black", "", &[]);

        assert_eq!(calculate_compatibility(&top, &bottoms), 0.7);
    }

    #[test]
    fn test_all_contributions_reach_one() {
        let top = garment(Category::Tops, "Navy", "Uniqlo", &["casual"]);
        let bottoms = garment(Category::Bottoms, "olive", "", &["casual"]);

        assert_eq!(calculate_compatibility(&top, &bottoms), 1.0);
    }

    #[test]
    fn test_nothing_matches() {
        let top = garment(Category::Tops, "green", "", &["sporty"]);
        let shoes = garment(Category::Shoes, "purple", "", &["formal"]);

        assert_eq!(calculate_compatibility(&top, &shoes), 0.0);
    }

    #[test]
    fn test_color_rules() {
        assert!(colors_match("Red", "red"));
        assert!(colors_match("olive", "beige"));
        assert!(colors_match("light blue", "denim"));
        assert!(colors_match("brown", "cream"));
        assert!(colors_match("bluebell", "denim"));
        assert!(!colors_match("green", "purple"));
        assert!(!colors_match("red", "blue"));
    }

    #[test]
    fn test_color_rules_are_symmetric() {
        let colors = ["red", "black", "blue", "denim", "olive", "", "dark navy", "cream"];
        for a in colors {
            for b in colors {
                assert_eq!(colors_match(a, b), colors_match(b, a), "{a} / {b}");
            }
        }
    }

    #[test]
    fn test_category_table_is_directed() {
        assert!(categories_compatible(Category::Tops, Category::Outerwear));
        assert!(!categories_compatible(Category::Shoes, Category::Tops));
        assert!(!categories_compatible(Category::Shoes, Category::Outerwear));
        assert!(categories_compatible(Category::Outerwear, Category::Bottoms));
        assert!(!categories_compatible(Category::Bottoms, Category::Outerwear));
        for category in Category::ALL {
            assert!(!categories_compatible(category, category));
        }
    }

    #[test]
    fn test_brand_match_requires_non_empty_brand() {
        let a = garment(Category::Tops, "green", "", &[]);
        let b = garment(Category::Shoes, "purple", "", &[]);
        assert!(!styles_compatible(&a, &b));

        let a = garment(Category::Tops, "green", "Zara", &[]);
        let b = garment(Category::Shoes, "purple", "Zara", &[]);
        assert!(styles_compatible(&a, &b));
    }

    #[test]
    fn test_shared_tags_keep_item_order_without_duplicates() {
        let a = garment(Category::Tops, "", "", &["summer", "casual", "summer", "linen"]);
        let b = garment(Category::Bottoms, "", "", &["linen", "summer"]);

        assert_eq!(shared_tags(&a, &b), vec!["summer", "linen"]);
    }
}
