// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Same-origin restriction (host and port must match, scheme may differ)
// - Depth limit and optional page cap
// - Pages fetched through a headless browser, or plain HTTP on request
//
// Submodules:
// - fetch: the browser and HTTP page fetchers
// - page: visible text and href extraction from HTML
// - links: relative link resolution and the same-origin check
// - walker: the crawl loop itself
// =============================================================================

mod fetch;
mod links;
mod page;
mod walker;

pub use fetch::{BrowserConfig, BrowserFetcher, HttpFetcher, PageFetcher};
pub use walker::{crawl, CrawlOptions, CrawlReport, FetchFailure};
