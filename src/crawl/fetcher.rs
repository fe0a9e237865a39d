// src/crawl/fetcher.rs
// =============================================================================
// Downloads pages over HTTP(S).
//
// One reqwest Client is built per crawl and shared by every task, so
// connections are pooled. Redirects and the user agent use reqwest's
// defaults. Each request carries its own timeout.
//
// Anything other than a 2xx answer with a readable body is an error:
// - connection / DNS / TLS failure      -> CrawlError::Request
// - timeout                             -> CrawlError::Request
// - 4xx / 5xx status                    -> CrawlError::Status
// - body that can't be decoded as text  -> CrawlError::Request
// =============================================================================

use reqwest::Client;
use std::time::Duration;

use crate::error::{CrawlError, Result};

#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CrawlError::Client)?;
        Ok(Self { client })
    }

    // Fetches `url` and returns the body as text.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
