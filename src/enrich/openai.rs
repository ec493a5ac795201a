// src/enrich/openai.rs
// Client for OpenAI chat completions in JSON mode.
//
// Used to turn free-form research answers (or case study text) into a JSON
// object with known keys.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use super::chat::{env_key, post_chat, Message};
use super::error::{ApiError, Result};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone, Serialize)]
pub struct StructureRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<serde_json::Value>,
}

impl StructureRequest {
    pub fn new(model: impl Into<String>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature,
            max_tokens: None,
            response_format: Some(json!({ "type": "json_object" })),
        }
    }

    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    // Older chat models reject response_format; they are asked for JSON in the prompt
    pub fn without_json_mode(mut self) -> Self {
        self.response_format = None;
        self
    }
}

#[derive(Clone)]
pub struct OpenAIClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: OPENAI_BASE_URL.to_string(),
        }
    }

    // Create from environment variable `OPENAI_API_KEY`
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(env_key("OPENAI_API_KEY")?))
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    // Sends the request and deserializes the answer as JSON into `T`
    pub async fn structure<T: DeserializeOwned>(&self, request: &StructureRequest) -> Result<T> {
        let url = format!("{}/chat/completions", self.base_url);
        let content = post_chat(&self.http_client, &url, &self.api_key, request).await?;

        serde_json::from_str(strip_code_fence(&content))
            .map_err(|e| ApiError::Parse(format!("Model answer is not the expected JSON: {}", e)))
    }
}

// Models sometimes wrap JSON in a ```json fence even when asked not to
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
