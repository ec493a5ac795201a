// src/extract/page.rs
// Pulls the case study title and body out of a page.
//
// Heuristic: the first <h1> is the title, the first <article> is the body.
// A page without either just yields an empty string for that field.

use scraper::{Html, Selector};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageData {
    pub title: String,
    pub content: String,
}

impl PageData {
    // Both fields must be present for the page to count as a case study
    pub fn is_case_study(&self) -> bool {
        !self.title.is_empty() && !self.content.is_empty()
    }
}

pub fn extract_page_data(html: &str) -> PageData {
    let document = Html::parse_document(html);

    PageData {
        title: first_text(&document, "h1"),
        content: first_text(&document, "article"),
    }
}

// Trimmed text of the first element matching a constant selector
fn first_text(document: &Html, selector: &str) -> String {
    let selector = Selector::parse(selector).unwrap();

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}
