// src/extract/cards.rs
// =============================================================================
// This module reads the customer listing page: a grid of "card" blocks, each
// holding a company name (<h3>) and a short description (<p>), plus a "Next"
// link when more pages follow.
// =============================================================================

use scraper::{Html, Selector};
use serde::Serialize;

// One card from the paginated customer listing
//
// Field order is the CSV column order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingCard {
    pub company_name: String,
    pub description: String,
    pub page_number: u32,
}

// What one listing page contained
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    pub cards: Vec<ListingCard>,
    // Number of div.card blocks, including ones we could not read
    pub card_blocks: usize,
    pub has_next: bool,
}

// Parses one listing page
//
// A card is kept only when it has both an <h3> and a <p>
pub fn extract_listing_page(html: &str, page_number: u32) -> ListingPage {
    let document = Html::parse_document(html);

    // Constant selectors, known to be valid
    let card_selector = Selector::parse("div.card").unwrap();
    let title_selector = Selector::parse("h3").unwrap();
    let description_selector = Selector::parse("p").unwrap();
    let anchor_selector = Selector::parse("a").unwrap();

    let mut page = ListingPage::default();

    for card in document.select(&card_selector) {
        page.card_blocks += 1;

        let title = card.select(&title_selector).next();
        let description = card.select(&description_selector).next();

        if let (Some(title), Some(description)) = (title, description) {
            page.cards.push(ListingCard {
                company_name: title.text().collect::<String>().trim().to_string(),
                description: description.text().collect::<String>().trim().to_string(),
                page_number,
            });
        }
    }

    page.has_next = document
        .select(&anchor_selector)
        .any(|anchor| anchor.text().collect::<String>() == "Next");

    page
}
