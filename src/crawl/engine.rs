// src/crawl/engine.rs
// =============================================================================
// This module implements the case study crawl: a depth-first traversal of the
// vendor site, bounded by depth and gated by a visited set.
//
// How it works, for each task (url, depth):
// 1. Skip it if depth > max_depth or the URL was already visited
// 2. Mark the URL visited BEFORE fetching it
// 3. Fetch the page; on failure log and stop this branch
// 4. Keep a record if the page has both a title and a body
// 5. Collect same-origin links that are not visited yet
// 6. For each link, in page order: sleep, then crawl it at depth + 1
//
// The traversal uses an explicit stack instead of recursion. Children are
// pushed in reverse so they pop in page order, and a child's whole subtree
// is finished before its next sibling starts, exactly like the recursive form.
// Admission is checked when a task is popped, not when it is pushed, so a
// link listed twice on one page is fetched once.
// =============================================================================

use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::fetch::Fetcher;
use crate::extract::{extract_links, extract_page_data};

pub const DEFAULT_ORIGIN: &str = "https://www.kinaxis.com";
pub const DEFAULT_SEED_URL: &str = "https://www.kinaxis.com/en/customers";
pub const DEFAULT_MAX_DEPTH: u32 = 3;
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

// Constants of one crawl run
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    // Only links starting with this string are followed
    pub origin: String,
    // Pages deeper than this are never fetched (the seed is depth 0)
    pub max_depth: u32,
    // Pause before descending into each discovered link
    pub delay: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            delay: DEFAULT_DELAY,
        }
    }
}

// One harvested case study
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseStudyRecord {
    pub url: String,
    pub title: String,
    pub content: String,
}

// A page waiting to be crawled
#[derive(Debug)]
struct CrawlTask {
    url: String,
    depth: u32,
    // Discovered links wait for the politeness delay; the seed does not
    after_delay: bool,
}

// State of a single crawl run
//
// The visited set only grows. Records are kept in discovery order.
pub struct Crawler<F: Fetcher> {
    fetcher: F,
    config: CrawlConfig,
    visited: HashSet<String>,
    records: Vec<CaseStudyRecord>,
}

impl<F: Fetcher> Crawler<F> {
    pub fn new(fetcher: F, config: CrawlConfig) -> Self {
        Self {
            fetcher,
            config,
            visited: HashSet::new(),
            records: Vec::new(),
        }
    }

    // Crawls from `url` at `depth` (use 0 for the seed)
    //
    // Never fails: page-level errors are logged and the traversal moves on
    pub async fn crawl(&mut self, url: &str, depth: u32) {
        let mut stack = vec![CrawlTask {
            url: url.to_string(),
            depth,
            after_delay: false,
        }];

        while let Some(task) = stack.pop() {
            if task.after_delay {
                tokio::time::sleep(self.config.delay).await;
            }

            let links = self.visit(&task.url, task.depth).await;

            for link in links.into_iter().rev() {
                stack.push(CrawlTask {
                    url: link,
                    depth: task.depth + 1,
                    after_delay: true,
                });
            }
        }
    }

    // Processes one page and returns the links to descend into
    async fn visit(&mut self, url: &str, depth: u32) -> Vec<String> {
        if !self.admit(url, depth) {
            debug!(url, depth, "Skipping page");
            return Vec::new();
        }

        info!(depth, "Crawling: {}", url);

        let html = match self.fetcher.fetch(url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(url, error = %e, "Error crawling page");
                return Vec::new();
            }
        };

        let page = extract_page_data(&html);
        if page.is_case_study() {
            self.records.push(CaseStudyRecord {
                url: url.to_string(),
                title: page.title,
                content: page.content,
            });
        }

        extract_links(&html, &self.config.origin, &self.visited)
    }

    // Check-then-insert; true when the page should be fetched
    fn admit(&mut self, url: &str, depth: u32) -> bool {
        if depth > self.config.max_depth || self.visited.contains(url) {
            return false;
        }
        self.visited.insert(url.to_string())
    }

    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    pub fn records(&self) -> &[CaseStudyRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<CaseStudyRecord> {
        self.records
    }
}
