// src/crawl/listing.rs
// =============================================================================
// This module pages through the customer listing.
//
// How it works:
// 1. Page 1 is the base URL, page N is `<base>?page=N`
// 2. Read every card on the page
// 3. Stop when a page has no cards, has no "Next" link, or fails to load
// 4. Otherwise sleep and move to the next page
// =============================================================================

use std::time::Duration;
use tracing::{info, warn};

use super::fetch::Fetcher;
use crate::extract::{extract_listing_page, ListingCard};

pub const DEFAULT_LISTING_URL: &str = "https://www.kinaxis.com/en/customers";
pub const DEFAULT_LISTING_DELAY: Duration = Duration::from_secs(2);

// Builds the URL of a listing page
fn page_url(base_url: &str, page: u32) -> String {
    if page > 1 {
        format!("{}?page={}", base_url, page)
    } else {
        base_url.to_string()
    }
}

// Collects cards from every listing page until the listing runs out
//
// A failed page ends the scrape but keeps what was collected before it
pub async fn scrape_listing<F: Fetcher>(
    fetcher: &F,
    base_url: &str,
    delay: Duration,
) -> Vec<ListingCard> {
    let mut cards = Vec::new();
    let mut page = 1;

    loop {
        info!(page, "Scraping listing page");

        let url = page_url(base_url, page);
        let html = match fetcher.fetch(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(url = %url, error = %e, "Error fetching listing page");
                break;
            }
        };

        let listing = extract_listing_page(&html, page);
        if listing.card_blocks == 0 {
            break;
        }

        cards.extend(listing.cards);

        if !listing.has_next {
            break;
        }

        page += 1;
        tokio::time::sleep(delay).await;
    }

    cards
}
