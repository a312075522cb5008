// src/crawl/walker.rs
// =============================================================================
// The crawl loop: fetch a page, pull keywords and links out of it, queue the
// new same-origin links, repeat.
//
// How it works:
// 1. Claim the seed URL (insert it into `visited`) and queue it
// 2. Pop the next page, fetch it, extract its keywords
// 3. If the page still has depth budget left, resolve its links and queue
//    every link not yet in `visited`, claiming it at the moment it is queued
// 4. Repeat until the queue is empty or the page cap is hit
//
// A URL is claimed when it is queued, not when it is fetched. Two pages that
// both link to the same unvisited page can therefore never queue it twice,
// and link cycles terminate.
//
// Depth budget: `levels` counts page levels, not hops.
//   levels = 0: nothing is fetched
//   levels = 1: only the seed
//   levels = 2: the seed plus every same-origin page it links to
//   ...
// The queue is FIFO (breadth-first), so each page is claimed at its
// shortest distance from the seed.
//
// Rust concepts:
// - VecDeque: FIFO queue for breadth-first order
// - HashSet: O(1) "have we seen this URL" checks
// - while let: loop until the queue is empty
// =============================================================================

use std::collections::{HashSet, VecDeque};

use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

use super::fetch::PageFetcher;
use super::links::resolve_links;
use super::page::parse_page;
use crate::keywords::{extract_keywords, ExtractOptions};

/// Limits for one crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlOptions {
    /// Page levels to fetch, the seed being level one
    pub levels: usize,
    /// Stop after this many fetch attempts, failed ones included
    pub max_pages: Option<usize>,
    pub extract: ExtractOptions,
}

/// A page that could not be fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchFailure {
    pub url: String,
    pub reason: String,
}

/// Everything one crawl gathered
#[derive(Debug, Default, Clone)]
pub struct CrawlReport {
    /// Keywords from every page; the same word may appear once per page
    pub keywords: Vec<String>,
    /// Tokens the classifier rejected, across all pages
    pub ignored: HashSet<String>,
    pub pages_fetched: usize,
    pub failures: Vec<FetchFailure>,
}

// Represents a page waiting in the crawl queue
#[derive(Debug, Clone)]
struct CrawlItem {
    url: String,
    levels: usize, // Levels left including this page
}

// Crawls a website starting from a URL
//
// Parameters:
//   fetcher: where page HTML comes from (browser, HTTP, or a test double)
//   start_url: the seed page
//   options: depth budget, page cap and keyword options
//   visited: every URL claimed so far; grows, never shrinks
//
// A failed fetch is logged and recorded, and the crawl carries on with the
// rest of the queue.
pub async fn crawl<F: PageFetcher>(
    fetcher: &F,
    start_url: &str,
    options: &CrawlOptions,
    visited: &mut HashSet<String>,
) -> CrawlReport {
    let mut report = CrawlReport::default();

    if options.levels == 0 {
        return report;
    }

    visited.insert(start_url.to_string());

    let mut queue = VecDeque::new();
    queue.push_back(CrawlItem {
        url: start_url.to_string(),
        levels: options.levels,
    });

    let mut attempts = 0usize;

    while let Some(item) = queue.pop_front() {
        if options.max_pages.is_some_and(|max| attempts >= max) {
            info!(
                skipped = queue.len() + 1,
                "page limit reached, leaving the rest of the queue unfetched"
            );
            break;
        }
        attempts += 1;

        info!(url = %item.url, levels = item.levels, "spidering");

        let html = match fetcher.fetch(&item.url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(url = %item.url, error = %e, "fetch failed, continuing");
                report.failures.push(FetchFailure {
                    url: item.url,
                    reason: e.to_string(),
                });
                continue;
            }
        };
        report.pages_fetched += 1;

        let page = parse_page(&html);
        let extraction = extract_keywords(&page.text_nodes, &options.extract);
        debug!(
            url = %item.url,
            keywords = extraction.keywords.len(),
            ignored = extraction.ignored.len(),
            "page extracted"
        );
        report.keywords.extend(extraction.keywords);
        report.ignored.extend(extraction.ignored);

        // Last level: its links would land beyond the budget
        if item.levels <= 1 {
            continue;
        }

        let base = match Url::parse(&item.url) {
            Ok(base) => base,
            Err(e) => {
                warn!(url = %item.url, error = %e, "cannot resolve links against page URL");
                continue;
            }
        };

        for link in resolve_links(&page.hrefs, &base) {
            // Claim before queueing
            if visited.insert(link.clone()) {
                debug!(from = %item.url, to = %link, "queued");
                queue.push_back(CrawlItem {
                    url: link,
                    levels: item.levels - 1,
                });
            }
        }
    }

    report
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a queue instead of recursion?
//    - Recursion uses one stack frame per hop, the queue lives on the heap
//    - The loop is the single place to stop early (page cap)
//
// 2. Why does `visited.insert()` decide whether to queue?
//    - HashSet::insert returns false if the value was already there
//    - So "check" and "claim" are one step and cannot drift apart
//
// 3. Why is `crawl` generic over `F: PageFetcher`?
//    - The browser, plain HTTP and the test double all plug in unchanged
//    - Generics are resolved at compile time, no boxing needed
// -----------------------------------------------------------------------------
