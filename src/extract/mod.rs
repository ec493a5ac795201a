// src/extract/mod.rs
// =============================================================================
// This module contains all HTML extraction logic.
//
// Submodules:
// - links: Finds same-origin links to crawl next
// - page: Pulls a case study title and body from a page
// - cards: Reads the paginated customer listing
// =============================================================================

mod cards;
mod links;
mod page;

pub use cards::{extract_listing_page, ListingCard};
pub use links::extract_links;
pub use page::extract_page_data;
