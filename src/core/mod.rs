// Core algorithm exports
pub mod compatibility;
pub mod engine;
pub mod insights;
pub mod matcher;
pub mod profile;

pub use compatibility::{calculate_compatibility, categories_compatible, colors_match, styles_compatible};
pub use engine::{confidence_score, RecommendationEngine, RecommendationError, FALLBACK_CONFIDENCE};
pub use insights::{wardrobe_insights, wardrobe_stats, BrandCount, ColorCount, Insight, WardrobeStats};
pub use matcher::{compatibility_reason, MatchSettings, Matcher, MAX_MATCHES, MIN_THRESHOLD};
pub use profile::{analyze_style, calculate_versatility, determine_formality, determine_seasonality};
