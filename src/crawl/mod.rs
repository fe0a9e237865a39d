// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Submodules:
// - classifier: decides which discovered links are crawled (scheme + dedup)
// - links: pulls <a href> values out of a page
// - fetcher: downloads a page over HTTP(S)
// - engine: spawns one task per page and builds the link tree
//
// Features:
// - Depth-first recursive crawl, every page on its own tokio task
// - Depth limit and per-page link cap
// - Global or per-depth deduplication
// - Bounded number of pages downloading at once
// - Failed pages are pruned from the tree instead of aborting the crawl
// =============================================================================

mod classifier;
mod engine;
mod fetcher;
mod links;

pub use classifier::UrlClassifier;
pub use engine::{crawl, CrawlReport, Crawler};
pub use fetcher::PageFetcher;
pub use links::extract_hrefs;
