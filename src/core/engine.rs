use crate::core::matcher::Matcher;
use crate::core::profile::analyze_style;
use crate::models::{
    CompatibilityResult, Garment, RecommendationResult, ShoppingSuggestion, StyleProfile,
};
use crate::services::suggestions::{StaticSuggestions, SuggestionProvider};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use thiserror::Error;

/// Confidence reported for the fallback result
pub const FALLBACK_CONFIDENCE: f64 = 0.6;

/// Failure inside the recommendation pipeline
#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("recommendation pipeline panicked: {0}")]
    Panicked(String),
}

/// Composes matching, style analysis and shopping suggestions
///
/// Holds no mutable state; one engine is shared by every request.
#[derive(Clone)]
pub struct RecommendationEngine {
    matcher: Matcher,
    suggestions: Arc<dyn SuggestionProvider>,
}

impl RecommendationEngine {
    pub fn new(matcher: Matcher, suggestions: Arc<dyn SuggestionProvider>) -> Self {
        Self {
            matcher,
            suggestions,
        }
    }

    /// Engine that only ever uses the static catalogue
    pub fn with_static_suggestions(matcher: Matcher) -> Self {
        Self::new(matcher, Arc::new(StaticSuggestions))
    }

    pub fn provider_name(&self) -> &'static str {
        self.suggestions.name()
    }

    /// Recommend pairings and purchases for `item`
    ///
    /// `wardrobe` is used as given; the caller excludes `item` from it. Any
    /// failure in the pipeline yields the fallback result instead. Building
    /// the fallback is not itself guarded, so a failure there reaches the
    /// caller.
    pub async fn recommend(&self, item: &Garment, wardrobe: &[Garment]) -> RecommendationResult {
        match self.try_recommend(item, wardrobe).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Error generating recommendations for item {}: {}", item.id, e);
                self.fallback(item, wardrobe)
            }
        }
    }

    /// Run the pipeline, reporting a failure instead of substituting the fallback
    pub async fn try_recommend(
        &self,
        item: &Garment,
        wardrobe: &[Garment],
    ) -> Result<RecommendationResult, RecommendationError> {
        AssertUnwindSafe(self.run_pipeline(item, wardrobe))
            .catch_unwind()
            .await
            .map_err(|payload| RecommendationError::Panicked(panic_message(payload.as_ref())))
    }

    async fn run_pipeline(&self, item: &Garment, wardrobe: &[Garment]) -> RecommendationResult {
        let existing_matches = self.matcher.find_matches(item, wardrobe);
        let shopping_suggestions = self.suggestions.suggest(item).await;
        let style_analysis = analyze_style(item);
        let confidence_score = confidence_score(&existing_matches, &shopping_suggestions);

        tracing::debug!(
            "Item {}: {} matches, {} suggestions from {} provider",
            item.id,
            existing_matches.len(),
            shopping_suggestions.len(),
            self.suggestions.name()
        );

        RecommendationResult {
            item_id: item.id,
            item_name: item.name.clone(),
            style_analysis,
            existing_matches,
            shopping_suggestions,
            confidence_score,
        }
    }

    /// Minimal result: default profile, fresh matches, static suggestions
    pub fn fallback(&self, item: &Garment, wardrobe: &[Garment]) -> RecommendationResult {
        RecommendationResult {
            item_id: item.id,
            item_name: item.name.clone(),
            style_analysis: StyleProfile::fallback(),
            existing_matches: self.matcher.find_matches(item, wardrobe),
            shopping_suggestions: StaticSuggestions.suggest_now(item),
            confidence_score: FALLBACK_CONFIDENCE,
        }
    }
}

/// 0.7 base, +0.2 with matches, +0.1 with suggestions
pub fn confidence_score(
    matches: &[CompatibilityResult],
    suggestions: &[ShoppingSuggestion],
) -> f64 {
    let mut tenths = 7u8;

    if !matches.is_empty() {
        tenths += 2;
    }

    if !suggestions.is_empty() {
        tenths += 1;
    }

    f64::from(tenths.min(10)) / 10.0
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
