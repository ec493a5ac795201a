// src/extract/links.rs
// =============================================================================
// This module extracts crawlable links from HTML pages.
//
// A link is kept when:
// 1. It comes from an <a> tag with an href attribute
// 2. It resolves to an absolute URL against the crawl origin
// 3. The absolute URL starts with the origin (plain string prefix)
// 4. It has not been visited yet
//
// Links are returned in document order. Duplicates inside one page are NOT
// removed here: the crawl engine's visited check stops the second fetch.
// =============================================================================

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

// Extracts same-origin, not-yet-visited links from HTML
//
// Parameters:
//   html: the page markup
//   origin: the fixed base URL; relative hrefs resolve against it
//   visited: URLs already admitted to the crawl
//
// Example:
//   html = "<a href='/case/acme'>Acme</a>"
//   origin = "https://example.com"
//   result = ["https://example.com/case/acme"]
pub fn extract_links(html: &str, origin: &str, visited: &HashSet<String>) -> Vec<String> {
    let mut links = Vec::new();

    let base = match Url::parse(origin) {
        Ok(url) => url,
        Err(_) => return links,
    };

    let document = Html::parse_document(html);

    // Constant selector, known to be valid
    let selector = Selector::parse("a[href]").unwrap();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Some(absolute_url) = resolve_href(&base, href) else {
            continue;
        };

        if absolute_url.starts_with(origin) && !visited.contains(&absolute_url) {
            links.push(absolute_url);
        }
    }

    links
}

// Resolves an href against the origin
//
// Blank hrefs are treated as malformed: the URL parser would otherwise
// resolve them to the origin itself
fn resolve_href(base: &Url, href: &str) -> Option<String> {
    if href.trim().is_empty() {
        return None;
    }

    base.join(href).ok().map(|url| url.to_string())
}
