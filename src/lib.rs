//! Wardrobe Advisor - outfit pairing and shopping recommendations
//!
//! This library scores how well garments go together, profiles the style of a
//! single garment, finds pairings in an existing wardrobe and proposes
//! complementary purchases from a static catalogue or a generative stylist.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{analyze_style, calculate_compatibility, Matcher, RecommendationEngine};
pub use models::{Category, CompatibilityResult, Garment, RecommendationResult, ShoppingSuggestion, StyleProfile};
