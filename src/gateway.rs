use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Rate limit exceeded. Please try again in a moment.")] RateLimited,
    #[error("AI credits depleted. Please add credits to your workspace.")] CreditsDepleted,
    #[error("AI gateway error: {0}")] Status(u16),
    #[error("HTTP error: {0}")] Http(String),
    #[error("Failed to decode AI gateway response: {0}")] Decode(String),
}

// --- Outbound payload ---

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: MessageContent,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role { User }

/// Plain text for ingredient-only requests, a two-part array when an image is attached.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum MessageContent {
    TextOnly(String),
    TextWithImage([ContentPart; 2]),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ImageUrl { pub url: String }

impl ChatMessage {
    pub fn user(prompt: String, image_data: Option<&str>) -> Self {
        let content = match image_data {
            Some(url) => MessageContent::TextWithImage([
                ContentPart::Text { text: prompt },
                ContentPart::ImageUrl { image_url: ImageUrl { url: url.to_string() } },
            ]),
            None => MessageContent::TextOnly(prompt),
        };
        Self { role: Role::User, content }
    }
}

impl ChatRequest {
    pub fn single(model: &str, message: ChatMessage) -> Self {
        Self { model: model.to_string(), messages: vec![message] }
    }
}

// --- Response parsing ---

// Every level is optional: null or oddly shaped replies still reach the fallback path.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
struct Choice { #[serde(default)] message: Option<ResponseMessage> }

#[derive(Debug, Deserialize)]
struct ResponseMessage { #[serde(default)] content: Option<serde_json::Value> }

/// Text of the first choice, empty when the gateway returned none or a non-string content.
fn first_choice_text(resp: ChatResponse) -> String {
    resp.choices
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .and_then(|content| match content {
            serde_json::Value::String(text) => Some(text),
            _ => None,
        })
        .unwrap_or_default()
}

// Shortens inline image data URIs so request bodies stay readable in logs.
fn truncate_data_uris(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, val) in map.iter_mut() {
                if key == "url" {
                    if let serde_json::Value::String(s) = val {
                        if s.starts_with("data:") && s.len() > 100 {
                            let head: String = s.chars().take(50).collect();
                            *val = serde_json::Value::String(format!("{}...[truncated {} chars]", head, s.len() - head.len()));
                        }
                    }
                } else {
                    truncate_data_uris(val);
                }
            }
        }
        serde_json::Value::Array(arr) => {
            for val in arr.iter_mut() {
                truncate_data_uris(val);
            }
        }
        _ => {}
    }
}

/// Chat-completions style model endpoint.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Sends one request and returns the first choice's message text.
    async fn complete(&self, api_key: &str, request: &ChatRequest) -> Result<String, GatewayError>;
}

pub struct GatewayClient {
    client: Client,
    url: String,
}

impl GatewayClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self { client: Client::new(), url: url.into() }
    }
}

#[async_trait]
impl ModelGateway for GatewayClient {
    async fn complete(&self, api_key: &str, request: &ChatRequest) -> Result<String, GatewayError> {
        info!("🔗 Calling AI gateway {} with model {}", self.url, request.model);
        if tracing::enabled!(tracing::Level::DEBUG) {
            if let Ok(mut body) = serde_json::to_value(request) {
                truncate_data_uris(&mut body);
                debug!("📤 Request body: {}", body);
            }
        }

        let response = self.client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))?;

        let status = response.status();
        info!("📥 Response status: {}", status);

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!("❌ AI gateway error: {} {}", status, error_body);
            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => GatewayError::RateLimited,
                StatusCode::PAYMENT_REQUIRED => GatewayError::CreditsDepleted,
                other => GatewayError::Status(other.as_u16()),
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;

        let text = first_choice_text(parsed);
        info!("✅ AI analysis received ({} chars)", text.len());
        Ok(text)
    }
}
