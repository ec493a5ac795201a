// src/crawl/mod.rs
// =============================================================================
// This module handles fetching and walking the vendor site.
//
// Features:
// - Depth-first case study crawl with a visited set and a depth limit
// - Same-origin restriction (doesn't crawl external sites)
// - Polite crawling with a fixed delay before each new page
// - Paginated scrape of the customer listing
// =============================================================================

mod engine;
mod fetch;
mod listing;

pub use engine::{
    CaseStudyRecord, CrawlConfig, Crawler, DEFAULT_DELAY, DEFAULT_MAX_DEPTH, DEFAULT_ORIGIN,
    DEFAULT_SEED_URL,
};
pub use fetch::{listing_headers, HttpFetcher};
pub use listing::{scrape_listing, DEFAULT_LISTING_DELAY, DEFAULT_LISTING_URL};
