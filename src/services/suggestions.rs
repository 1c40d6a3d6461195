use crate::config::StylistSettings;
use crate::models::{Garment, ShoppingSuggestion};
use crate::services::catalog::static_suggestions;
use crate::services::stylist::StylistClient;
use async_trait::async_trait;
use std::sync::Arc;

/// Upper bound on suggestions returned by any provider
pub const MAX_SUGGESTIONS: usize = 5;

/// Source of shopping suggestions for a garment
///
/// Implementations never fail: whatever goes wrong upstream, the caller
/// gets a (possibly static) list of at most `MAX_SUGGESTIONS` entries.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    async fn suggest(&self, item: &Garment) -> Vec<ShoppingSuggestion>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Pre-populated catalogue lookup keyed by category
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticSuggestions;

impl StaticSuggestions {
    pub fn suggest_now(&self, item: &Garment) -> Vec<ShoppingSuggestion> {
        let mut suggestions = static_suggestions(item.category);
        suggestions.truncate(MAX_SUGGESTIONS);
        suggestions
    }
}

#[async_trait]
impl SuggestionProvider for StaticSuggestions {
    async fn suggest(&self, item: &Garment) -> Vec<ShoppingSuggestion> {
        self.suggest_now(item)
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Suggestions generated by the styling service, with static fallback
pub struct GenerativeSuggestions {
    client: StylistClient,
    fallback: StaticSuggestions,
}

impl GenerativeSuggestions {
    pub fn new(client: StylistClient) -> Self {
        Self {
            client,
            fallback: StaticSuggestions,
        }
    }
}

#[async_trait]
impl SuggestionProvider for GenerativeSuggestions {
    async fn suggest(&self, item: &Garment) -> Vec<ShoppingSuggestion> {
        match self.client.suggest_pairings(item).await {
            Ok(mut suggestions) => {
                suggestions.truncate(MAX_SUGGESTIONS);
                suggestions
            }
            Err(e) => {
                tracing::warn!(
                    "Stylist suggestions failed for item {}, using static catalogue: {}",
                    item.id,
                    e
                );
                self.fallback.suggest_now(item)
            }
        }
    }

    fn name(&self) -> &'static str {
        "generative"
    }
}

/// Pick the provider the configuration allows
///
/// A usable API key selects the generative provider; anything else, including
/// a client that cannot be built, selects the static catalogue.
pub fn build_provider(settings: &StylistSettings) -> Arc<dyn SuggestionProvider> {
    if settings.credential().is_none() {
        tracing::info!("No stylist API key configured, using static shopping suggestions");
        return Arc::new(StaticSuggestions);
    }

    match StylistClient::new(settings) {
        Ok(client) => {
            tracing::info!("Using generative shopping suggestions (model: {})", settings.model);
            Arc::new(GenerativeSuggestions::new(client))
        }
        Err(e) => {
            tracing::error!("Failed to create stylist client ({}), using static suggestions", e);
            Arc::new(StaticSuggestions)
        }
    }
}
