use crate::core::compatibility::{
    calculate_compatibility, categories_compatible, colors_match, same_brand, shared_tags,
};
use crate::models::{CompatibilityResult, Garment};

/// Lowest threshold a matcher accepts; scores must stay strictly above it
pub const MIN_THRESHOLD: f64 = 0.6;
/// Most matches a matcher ever returns
pub const MAX_MATCHES: usize = 5;

/// Matching thresholds
///
/// Configured values may tighten matching but never loosen it past
/// `MIN_THRESHOLD` and `MAX_MATCHES`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchSettings {
    /// Scores must be strictly greater than this to count as a match
    pub threshold: f64,
    pub limit: usize,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            threshold: MIN_THRESHOLD,
            limit: MAX_MATCHES,
        }
    }
}

impl MatchSettings {
    /// Raise the threshold to at least `MIN_THRESHOLD`, cap the limit at `MAX_MATCHES`
    pub fn clamped(self) -> Self {
        let threshold = if self.threshold.is_nan() {
            MIN_THRESHOLD
        } else {
            self.threshold.max(MIN_THRESHOLD)
        };
        let limit = self.limit.min(MAX_MATCHES);

        if threshold != self.threshold || limit != self.limit {
            tracing::warn!(
                "Match settings (threshold: {}, limit: {}) clamped to (threshold: {}, limit: {})",
                self.threshold,
                self.limit,
                threshold,
                limit
            );
        }

        Self { threshold, limit }
    }
}

/// Finds the garments in a wardrobe that pair with a target item
///
/// # Pipeline Stages
/// 1. Pairwise compatibility scoring against every candidate
/// 2. Threshold filtering
/// 3. Stable ranking by score (ties keep wardrobe order)
/// 4. Truncation to the configured limit
#[derive(Debug, Clone)]
pub struct Matcher {
    settings: MatchSettings,
}

impl Matcher {
    pub fn new(settings: MatchSettings) -> Self {
        Self {
            settings: settings.clamped(),
        }
    }

    pub fn with_default_settings() -> Self {
        Self {
            settings: MatchSettings::default(),
        }
    }

    pub fn settings(&self) -> MatchSettings {
        self.settings
    }

    /// Find wardrobe garments compatible with `item`
    ///
    /// # Arguments
    /// * `item` - The garment recommendations are built around
    /// * `candidates` - The rest of the wardrobe, already excluding `item`
    ///
    /// # Returns
    /// At most `limit` matches, highest score first
    pub fn find_matches(&self, item: &Garment, candidates: &[Garment]) -> Vec<CompatibilityResult> {
        let mut matches: Vec<CompatibilityResult> = candidates
            .iter()
            .filter_map(|candidate| {
                let score = calculate_compatibility(item, candidate);

                if score > self.settings.threshold {
                    Some(CompatibilityResult {
                        id: candidate.id,
                        name: candidate.name.clone(),
                        category: candidate.category,
                        color: candidate.color.clone(),
                        brand: candidate.brand.clone(),
                        image_url: candidate.image_url.clone(),
                        compatibility_score: score,
                        reason: compatibility_reason(item, candidate),
                    })
                } else {
                    None
                }
            })
            .collect();

        tracing::debug!(
            "Scored {} candidates for item {}, {} above threshold",
            candidates.len(),
            item.id,
            matches.len()
        );

        // sort_by is stable, so equal scores keep wardrobe order
        matches.sort_by(|a, b| {
            b.compatibility_score
                .partial_cmp(&a.compatibility_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        matches.truncate(self.settings.limit);
        matches
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_settings()
    }
}

/// Explain which contributions fired for a pair, joined with "; "
pub fn compatibility_reason(item: &Garment, other: &Garment) -> String {
    let mut reasons = Vec::new();

    if colors_match(&item.color, &other.color) {
        reasons.push(format!(
            "Colors {} and {} complement each other",
            item.color, other.color
        ));
    }

    if categories_compatible(item.category, other.category) {
        reasons.push(format!("{} pairs well with {}", item.category, other.category));
    }

    let common = shared_tags(item, other);
    if !common.is_empty() {
        reasons.push(format!("Shared style: {}", common.join(", ")));
    } else if same_brand(item, other) {
        reasons.push(format!("Both from {}", item.brand));
    }

    if reasons.is_empty() {
        "Good overall style match".to_string()
    } else {
        reasons.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn create_candidate(id: i64, category: Category, color: &str, tags: &[&str]) -> Garment {
        Garment {
            id,
            name: format!("Item {}", id),
            category,
            color: color.to_string(),
            brand: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            image_url: format!("https://img.test/{}.jpg", id),
            price: None,
            wear_count: 0,
            last_worn: None,
        }
    }

    #[test]
    fn test_find_matches_basic() {
        let matcher = Matcher::with_default_settings();
        let item = create_candidate(0, Category::Tops, "white", &[]);

        let candidates = vec![
            create_candidate(1, Category::Bottoms, "black", &[]), // 0.7
            create_candidate(2, Category::Shoes, "black", &[]),   // 0.3, Tops -> Shoes not paired
            create_candidate(3, Category::Tops, "white", &[]),    // 0.3, same category
        ];

        let matches = matcher.find_matches(&item, &candidates);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, 1);
        assert_eq!(matches[0].compatibility_score, 0.7);
        assert_eq!(
            matches[0].reason,
            "Colors white and black complement each other; Tops pairs well with Bottoms"
        );
    }

    #[test]
    fn test_threshold_is_strict() {
        let matcher = Matcher::with_default_settings();
        let item = create_candidate(0, Category::Tops, "white", &["casual"]);

        // color + style = exactly 0.6, not a match
        let candidates = vec![create_candidate(1, Category::Shoes, "black", &["casual"])];

        assert!(matcher.find_matches(&item, &candidates).is_empty());
    }

    #[test]
    fn test_matches_sorted_and_stable() {
        let matcher = Matcher::with_default_settings();
        let item = create_candidate(0, Category::Tops, "white", &["casual"]);

        let candidates = vec![
            create_candidate(1, Category::Bottoms, "black", &[]),         // 0.7
            create_candidate(2, Category::Bottoms, "black", &["casual"]), // 1.0
            create_candidate(3, Category::Outerwear, "grey", &[]),        // 0.7
            create_candidate(4, Category::Accessories, "red", &["casual"]), // 1.0
        ];

        let ids: Vec<i64> = matcher
            .find_matches(&item, &candidates)
            .iter()
            .map(|m| m.id)
            .collect();

        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_respects_limit() {
        let matcher = Matcher::with_default_settings();
        let item = create_candidate(0, Category::Tops, "white", &[]);

        let candidates: Vec<Garment> = (1..=20)
            .map(|i| create_candidate(i, Category::Bottoms, "navy", &[]))
            .collect();

        let matches = matcher.find_matches(&item, &candidates);

        assert_eq!(matches.len(), 5);
        assert_eq!(matches.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_loose_settings_are_clamped() {
        let matcher = Matcher::new(MatchSettings {
            threshold: 0.0,
            limit: 12,
        });
        assert_eq!(matcher.settings(), MatchSettings::default());

        // Tops -> Shoes never pairs, so every candidate scores 0.3
        let item = create_candidate(0, Category::Tops, "white", &[]);
        let mut candidates: Vec<Garment> = (1..=10)
            .map(|i| create_candidate(i, Category::Shoes, "green", &[]))
            .collect();
        assert!(matcher.find_matches(&item, &candidates).is_empty());

        candidates.extend((11..=22).map(|i| create_candidate(i, Category::Bottoms, "navy", &[])));
        let matches = matcher.find_matches(&item, &candidates);

        assert_eq!(matches.len(), MAX_MATCHES);
        assert!(matches.iter().all(|m| m.compatibility_score > MIN_THRESHOLD));
    }

    #[test]
    fn test_stricter_settings_are_kept() {
        let strict = MatchSettings {
            threshold: 0.8,
            limit: 2,
        };
        assert_eq!(Matcher::new(strict).settings(), strict);

        let nan = MatchSettings {
            threshold: f64::NAN,
            limit: 3,
        };
        assert_eq!(Matcher::new(nan).settings().threshold, MIN_THRESHOLD);
    }

    #[test]
    fn test_empty_wardrobe() {
        let matcher = Matcher::default();
        let item = create_candidate(0, Category::Shoes, "", &[]);

        assert!(matcher.find_matches(&item, &[]).is_empty());
    }

    #[test]
    fn test_reason_mentions_brand_when_no_tags_shared() {
        let mut item = create_candidate(0, Category::Tops, "green", &[]);
        let mut other = create_candidate(1, Category::Bottoms, "purple", &[]);
        item.brand = "Everlane".to_string();
        other.brand = "Everlane".to_string();

        assert_eq!(
            compatibility_reason(&item, &other),
            "Tops pairs well with Bottoms; Both from Everlane"
        );
    }

    #[test]
    fn test_reason_when_nothing_fired() {
        let item = create_candidate(0, Category::Tops, "green", &[]);
        let other = create_candidate(1, Category::Shoes, "purple", &[]);

        assert_eq!(compatibility_reason(&item, &other), "Good overall style match");
    }
}
