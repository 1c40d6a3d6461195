use crate::config::StylistSettings;
use crate::models::{Garment, ShoppingSuggestion};
use crate::services::catalog::{
    extract_price, product_image_for, store_for_price_range, PLACEHOLDER_LINK,
};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// System instruction sent with every styling request
pub const SYSTEM_PROMPT: &str = "You are a professional fashion stylist and personal shopper.";

/// Number of suggestions requested from the service
pub const REQUESTED_SUGGESTIONS: usize = 5;

/// Errors that can occur when talking to the styling service
#[derive(Debug, Error)]
pub enum StylistError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("No API key configured")]
    MissingApiKey,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// A suggestion as the styling service returns it, before enrichment
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StylistSuggestion {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub price_range: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub style: String,
}

impl StylistSuggestion {
    /// Attach image, store, link and numeric price
    pub fn enrich(self) -> ShoppingSuggestion {
        ShoppingSuggestion {
            image_url: product_image_for(&self.category).to_string(),
            store: store_for_price_range(&self.price_range).to_string(),
            link: PLACEHOLDER_LINK.to_string(),
            price: extract_price(&self.price_range),
            name: self.name,
            category: self.category,
            colors: self.colors,
            price_range: self.price_range,
            reason: self.reason,
            style: self.style,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Chat-completion client for the styling service
///
/// Handles prompt construction, the single outbound request (no retries),
/// and turning the generated text into enriched shopping suggestions.
pub struct StylistClient {
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    client: Client,
}

impl StylistClient {
    /// Create a new client; fails without a usable API key
    pub fn new(settings: &StylistSettings) -> Result<Self, StylistError> {
        let api_key = settings.credential().ok_or(StylistError::MissingApiKey)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: settings.base_url.clone(),
            api_key: api_key.to_string(),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            client,
        })
    }

    /// Ask the service for pairing suggestions for `item`
    ///
    /// Returns at most five enriched suggestions.
    pub async fn suggest_pairings(
        &self,
        item: &Garment,
    ) -> Result<Vec<ShoppingSuggestion>, StylistError> {
        let prompt = build_prompt(item);
        let content = self.complete(SYSTEM_PROMPT, &prompt).await?;
        let suggestions = parse_suggestions(&content)?;

        tracing::debug!(
            "Stylist returned {} suggestions for item {}",
            suggestions.len(),
            item.id
        );

        Ok(suggestions
            .into_iter()
            .take(REQUESTED_SUGGESTIONS)
            .map(StylistSuggestion::enrich)
            .collect())
    }

    /// Send one chat completion and return the generated text
    pub async fn complete(&self, system: &str, prompt: &str) -> Result<String, StylistError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(StylistError::Unauthorized);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::debug!("Stylist error body: {}", body);
            return Err(StylistError::ApiError(format!(
                "Chat completion failed: {}",
                status
            )));
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| StylistError::InvalidResponse(format!("Malformed completion: {}", e)))?;

        reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| StylistError::InvalidResponse("Completion has no content".into()))
    }
}

/// Build the user prompt describing the item
pub fn build_prompt(item: &Garment) -> String {
    let brand = if item.brand.is_empty() {
        "unknown brand"
    } else {
        item.brand.as_str()
    };

    format!(
        r#"I have a {category} that is {color} in color, made by {brand}.
The item is called "{name}".

Please suggest {count} complementary clothing items that would pair well with this item.
For each suggestion, provide:
1. Item name
2. Category
3. Suggested colors
4. Price range
5. Why it pairs well

Format the response as JSON with this structure:
{{
    "suggestions": [
        {{
            "name": "item name",
            "category": "category",
            "colors": ["color1", "color2"],
            "price_range": "price range",
            "reason": "why it pairs well",
            "style": "style description"
        }}
    ]
}}"#,
        category = item.category.as_str().to_lowercase(),
        color = item.color,
        brand = brand,
        name = item.name,
        count = REQUESTED_SUGGESTIONS,
    )
}

/// Parse the `{"suggestions": [...]}` payload out of generated text
///
/// The object may stand alone or be embedded in surrounding prose or a
/// fenced block. A missing `suggestions` key means no suggestions.
pub fn parse_suggestions(text: &str) -> Result<Vec<StylistSuggestion>, StylistError> {
    let value = parse_object(text.trim())
        .or_else(|| embedded_object(text).and_then(parse_object))
        .ok_or_else(|| StylistError::InvalidResponse("No JSON object in completion".into()))?;

    match value.get("suggestions") {
        None => Ok(Vec::new()),
        Some(list) => serde_json::from_value(list.clone()).map_err(|e| {
            StylistError::InvalidResponse(format!("Failed to parse suggestions: {}", e))
        }),
    }
}

fn parse_object(text: &str) -> Option<Value> {
    serde_json::from_str::<Value>(text)
        .ok()
        .filter(Value::is_object)
}

fn embedded_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn sample_item(brand: &str) -> Garment {
        Garment {
            id: 3,
            name: "Striped Linen Shirt".to_string(),
            category: Category::Tops,
            color: "navy".to_string(),
            brand: brand.to_string(),
            tags: vec![],
            image_url: String::new(),
            price: None,
            wear_count: 0,
            last_worn: None,
        }
    }

    #[test]
    fn test_client_requires_api_key() {
        let settings = StylistSettings::default();
        assert!(matches!(
            StylistClient::new(&settings),
            Err(StylistError::MissingApiKey)
        ));

        let settings = StylistSettings {
            api_key: Some("sk-test".to_string()),
            ..StylistSettings::default()
        };
        let client = StylistClient::new(&settings).unwrap();
        assert_eq!(client.api_key, "sk-test");
        assert_eq!(client.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_prompt_mentions_item() {
        let prompt = build_prompt(&sample_item(""));
        assert!(prompt.starts_with("I have a tops that is navy in color, made by unknown brand."));
        assert!(prompt.contains("\"Striped Linen Shirt\""));
        assert!(prompt.contains("suggest 5 complementary"));
        assert!(prompt.contains("\"price_range\": \"price range\""));

        let prompt = build_prompt(&sample_item("Everlane"));
        assert!(prompt.contains("made by Everlane."));
    }

    #[test]
    fn test_parse_plain_json() {
        let text = r#"{"suggestions": [{"name": "Chinos", "category": "Bottoms",
            "colors": ["khaki"], "price_range": "$50-70", "reason": "Balanced", "style": "Smart"}]}"#;

        let parsed = parse_suggestions(text).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "Chinos");
        assert_eq!(parsed[0].colors, vec!["khaki"]);
    }

    #[test]
    fn test_parse_fenced_json() {
        let text = "Here you go:\n```json\n{\"suggestions\": [{\"name\": \"Loafers\", \"category\": \"Shoes\"}]}\n```";

        let parsed = parse_suggestions(text).unwrap();
        assert_eq!(parsed[0].category, "Shoes");
        assert_eq!(parsed[0].price_range, "");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_suggestions("I can't help with that.").is_err());
        assert!(parse_suggestions("[1, 2, 3]").is_err());
        assert!(parse_suggestions(r#"{"suggestions": [{"name": "No category"}]}"#).is_err());
    }

    #[test]
    fn test_missing_suggestions_key_is_empty() {
        assert!(parse_suggestions(r#"{"items": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_enrich_from_price_range() {
        let suggestion = StylistSuggestion {
            name: "Wool Overcoat".to_string(),
            category: "Outerwear".to_string(),
            colors: vec!["camel".to_string()],
            price_range: "$150-250".to_string(),
            reason: "Layers over knitwear".to_string(),
            style: "Classic".to_string(),
        }
        .enrich();

        assert_eq!(suggestion.store, "Nordstrom");
        assert_eq!(suggestion.price, 200.0);
        assert_eq!(suggestion.link, "#");
        assert!(suggestion.image_url.contains("1040945"));
    }
}
