// src/enrich/perplexity.rs
// Client for Perplexity's search-grounded chat completions.
//
// Perplexity answers the free-form research question about a company; the
// answer is then handed to OpenAI to be turned into JSON.

use reqwest::Client;
use serde::Serialize;

use super::chat::{env_key, post_chat, Message};
use super::error::Result;

pub const PERPLEXITY_BASE_URL: &str = "https://api.perplexity.ai";
pub const PERPLEXITY_MODEL: &str = "llama-3.1-sonar-small-128k-online";

// Request body for /chat/completions
//
// The optional knobs are only sent when set
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub top_p: f32,
    pub return_citations: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_domain_filter: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_images: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_related_questions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
}

impl SearchRequest {
    pub fn new(system: impl Into<String>, query: impl Into<String>, temperature: f32) -> Self {
        Self {
            model: PERPLEXITY_MODEL.to_string(),
            messages: vec![Message::system(system), Message::user(query)],
            temperature,
            top_p: 0.9,
            return_citations: true,
            search_domain_filter: None,
            return_images: None,
            return_related_questions: None,
            top_k: None,
            stream: None,
            presence_penalty: None,
            frequency_penalty: None,
        }
    }
}

#[derive(Clone)]
pub struct PerplexityClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl PerplexityClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: PERPLEXITY_BASE_URL.to_string(),
        }
    }

    // Create from environment variable `PERPLEXITY_API_KEY`
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(env_key("PERPLEXITY_API_KEY")?))
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    // Sends the research question and returns the answer text
    pub async fn ask(&self, request: &SearchRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        post_chat(&self.http_client, &url, &self.api_key, request).await
    }
}
