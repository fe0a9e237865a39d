// src/lib.rs
// =============================================================================
// url-finder: a depth-bounded concurrent web crawler.
//
// Starting from a seed URL it downloads pages, saves each one under
// `<root>/<depth>/`, follows a bounded number of links per page and returns
// the tree of pages it reached.
//
//   cli      -> command-line arguments
//   config   -> the immutable CrawlConfig
//   crawl    -> classifier, link extraction, HTTP fetcher, crawl engine
//   persist  -> file names and writing pages to disk
//   tree     -> the link tree and its renderings
//   error    -> CrawlError
// =============================================================================

pub mod cli;
pub mod config;
pub mod crawl;
pub mod error;
pub mod persist;
pub mod tree;

pub use config::CrawlConfig;
pub use crawl::{crawl, CrawlReport, Crawler};
pub use error::{CrawlError, Result};
pub use tree::{render_json, render_text, UrlTreeNode};
