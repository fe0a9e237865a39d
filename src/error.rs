// src/error.rs
// =============================================================================
// Errors produced while crawling a single page.
//
// Every variant except `Client` is node-local: the engine catches it, prunes
// the node from its parent and keeps crawling. `Client` can only happen while
// building the crawler and is fatal.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("failed to write {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("fetch pool was closed")]
    PoolClosed,
}

pub type Result<T> = std::result::Result<T, CrawlError>;
