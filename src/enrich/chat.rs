// src/enrich/chat.rs
// =============================================================================
// Wire types shared by both AI APIs.
//
// Perplexity speaks the same chat completions dialect as OpenAI: a list of
// role/content messages in, a list of choices out. Both clients post through
// `post_chat` and only differ in the request body they send.
// =============================================================================

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::{ApiError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponseRaw {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

// Posts a chat completion body and returns the first choice's content
pub async fn post_chat<B: Serialize + ?Sized>(
    http: &Client,
    url: &str,
    api_key: &str,
    body: &B,
) -> Result<String> {
    let start = std::time::Instant::now();

    let response = http
        .post(url)
        .bearer_auth(api_key)
        .json(body)
        .send()
        .await
        .map_err(|e| {
            warn!(url, error = %e, "Chat completion request failed");
            ApiError::Network(e.to_string())
        })?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        warn!(url, status = %status, error = %error_text, "Chat completion API error");
        return Err(ApiError::Api(format!("HTTP {}: {}", status, error_text)));
    }

    let raw: ChatResponseRaw = response
        .json()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))?;

    debug!(url, duration_ms = start.elapsed().as_millis(), "Chat completion");

    raw.choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| ApiError::Api("No choices in response".into()))
}

// Reads an API key from the environment
pub fn env_key(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| ApiError::Config(format!("{} not set", name)))
}
