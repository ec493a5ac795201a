// src/enrich/error.rs
// Error types for the AI API clients.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    // Missing API key, invalid settings
    #[error("Configuration error: {0}")]
    Config(String),

    // Connection failed, timeout
    #[error("Network error: {0}")]
    Network(String),

    // Non-2xx response or an empty answer
    #[error("API error: {0}")]
    Api(String),

    // Response body or model answer is not what we asked for
    #[error("Parse error: {0}")]
    Parse(String),
}
