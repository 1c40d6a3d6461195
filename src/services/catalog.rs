use crate::models::{Category, ShoppingSuggestion};
use regex::Regex;
use std::sync::OnceLock;

const TOPS_IMAGE: &str =
    "https://images.pexels.com/photos/996329/pexels-photo-996329.jpeg?auto=compress&cs=tinysrgb&w=400";
const BOTTOMS_IMAGE: &str =
    "https://images.pexels.com/photos/1598505/pexels-photo-1598505.jpeg?auto=compress&cs=tinysrgb&w=400";
const OUTERWEAR_IMAGE: &str =
    "https://images.pexels.com/photos/1040945/pexels-photo-1040945.jpeg?auto=compress&cs=tinysrgb&w=400";
const SHOES_IMAGE: &str =
    "https://images.pexels.com/photos/1598508/pexels-photo-1598508.jpeg?auto=compress&cs=tinysrgb&w=400";
const ACCESSORIES_IMAGE: &str =
    "https://images.pexels.com/photos/1598509/pexels-photo-1598509.jpeg?auto=compress&cs=tinysrgb&w=400";

/// Link placeholder until real product links exist
pub const PLACEHOLDER_LINK: &str = "#";

/// Price used when a range carries no number
pub const DEFAULT_PRICE: f64 = 50.0;

/// Store tiers checked in order against the price range text
const STORE_TIERS: [(&[&str], &str); 3] = [
    (&["$20", "$30"], "H&M"),
    (&["$50", "$60"], "Zara"),
    (&["$80", "$100"], "Banana Republic"),
];
const PREMIUM_STORE: &str = "Nordstrom";

struct CatalogEntry {
    name: &'static str,
    category: &'static str,
    colors: &'static [&'static str],
    price_range: &'static str,
    price: f64,
    reason: &'static str,
    style: &'static str,
    image_url: &'static str,
    store: &'static str,
}

impl CatalogEntry {
    fn to_suggestion(&self) -> ShoppingSuggestion {
        ShoppingSuggestion {
            name: self.name.to_string(),
            category: self.category.to_string(),
            colors: self.colors.iter().map(|c| c.to_string()).collect(),
            price_range: self.price_range.to_string(),
            price: self.price,
            reason: self.reason.to_string(),
            style: self.style.to_string(),
            image_url: self.image_url.to_string(),
            store: self.store.to_string(),
            link: PLACEHOLDER_LINK.to_string(),
        }
    }
}

static FOR_TOPS: [CatalogEntry; 2] = [
    CatalogEntry {
        name: "Classic Denim Jeans",
        category: "Bottoms",
        colors: &["blue", "black", "white"],
        price_range: "$50-80",
        price: 65.0,
        reason: "Versatile bottoms that pair with most tops",
        style: "Casual",
        image_url: BOTTOMS_IMAGE,
        store: "Levi's",
    },
    CatalogEntry {
        name: "Tailored Blazer",
        category: "Outerwear",
        colors: &["navy", "black", "gray"],
        price_range: "$80-120",
        price: 95.0,
        reason: "Elevates any casual top for professional settings",
        style: "Professional",
        image_url: OUTERWEAR_IMAGE,
        store: "Zara",
    },
];

static FOR_BOTTOMS: [CatalogEntry; 2] = [
    CatalogEntry {
        name: "Cotton Button-Down Shirt",
        category: "Tops",
        colors: &["white", "light blue", "pink"],
        price_range: "$40-70",
        price: 55.0,
        reason: "Classic top that works with most bottom styles",
        style: "Classic",
        image_url: TOPS_IMAGE,
        store: "Uniqlo",
    },
    CatalogEntry {
        name: "Leather Ankle Boots",
        category: "Shoes",
        colors: &["brown", "black", "tan"],
        price_range: "$80-150",
        price: 110.0,
        reason: "Versatile footwear that complements most bottom styles",
        style: "Versatile",
        image_url: SHOES_IMAGE,
        store: "Cole Haan",
    },
];

static GENERIC: [CatalogEntry; 1] = [CatalogEntry {
    name: "Versatile Accessory",
    category: "Accessories",
    colors: &["neutral"],
    price_range: "$20-50",
    price: 35.0,
    reason: "Complements your style",
    style: "Universal",
    image_url: ACCESSORIES_IMAGE,
    store: "H&M",
}];

/// Pre-populated suggestions for a garment category
///
/// Only Tops and Bottoms have dedicated entries; every other category gets
/// the single generic accessory.
pub fn static_suggestions(category: Category) -> Vec<ShoppingSuggestion> {
    let entries: &[CatalogEntry] = match category {
        Category::Tops => &FOR_TOPS,
        Category::Bottoms => &FOR_BOTTOMS,
        _ => &GENERIC,
    };

    entries.iter().map(CatalogEntry::to_suggestion).collect()
}

/// Stock product image for a category name as returned by the stylist
pub fn product_image_for(category: &str) -> &'static str {
    match category {
        "Tops" => TOPS_IMAGE,
        "Bottoms" => BOTTOMS_IMAGE,
        "Outerwear" => OUTERWEAR_IMAGE,
        "Shoes" => SHOES_IMAGE,
        "Accessories" => ACCESSORIES_IMAGE,
        _ => TOPS_IMAGE,
    }
}

/// Pick a store by looking for dollar amounts in the price range text
///
/// Tiers are checked cheapest first and the first hit wins, so "$200-300"
/// lands on H&M because it contains "$20".
pub fn store_for_price_range(price_range: &str) -> &'static str {
    STORE_TIERS
        .iter()
        .find(|(amounts, _)| amounts.iter().any(|amount| price_range.contains(amount)))
        .map(|(_, store)| *store)
        .unwrap_or(PREMIUM_STORE)
}

fn integer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+").expect("integer pattern is valid"))
}

/// Representative price of a range: the mean of the first two numbers,
/// the only number, or the default when there is none
pub fn extract_price(price_range: &str) -> f64 {
    let numbers: Vec<f64> = integer_pattern()
        .find_iter(price_range)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .take(2)
        .collect();

    match numbers.as_slice() {
        [low, high] => (low + high) / 2.0,
        [only] => *only,
        _ => DEFAULT_PRICE,
    }
}
