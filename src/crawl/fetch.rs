// src/crawl/fetch.rs
// =============================================================================
// This module fetches raw HTML for a single URL.
//
// Key functionality:
// - One GET request per call, no retries
// - A fixed header set (browser-like User-Agent) sent with every request
// - Non-2xx responses count as failures, just like network errors
//
// The Fetcher trait is the seam between the crawl engine and the network.
// The real implementation uses reqwest; tests plug in an in-memory fake.
// =============================================================================

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode};
use thiserror::Error;

// The User-Agent the case study crawler presents to the vendor site
pub const CRAWLER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

// The listing scraper sends a shorter UA plus an explicit Accept header
pub const LISTING_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
pub const LISTING_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

// Why a fetch failed
//
// Both variants carry the URL so a log line is useful on its own
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: StatusCode },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

// Anything that can turn a URL into page markup
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

// Fetcher backed by a reqwest client with fixed default headers
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds a fetcher that sends the crawler's User-Agent
    pub fn new() -> reqwest::Result<Self> {
        Self::with_headers(crawler_headers())
    }

    // Builds a fetcher that sends the given headers on every request
    //
    // No timeout is configured: the client default applies
    pub fn with_headers(headers: HeaderMap) -> reqwest::Result<Self> {
        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }

        response.text().await.map_err(transport)
    }
}

// Header set used by the recursive case study crawler
pub fn crawler_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(CRAWLER_USER_AGENT));
    headers
}

// Header set used by the paginated listing scraper
pub fn listing_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(LISTING_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static(LISTING_ACCEPT));
    headers
}
