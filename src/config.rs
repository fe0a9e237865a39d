// src/config.rs
// =============================================================================
// The immutable crawl configuration.
//
// Built once at startup (from the CLI, or directly in tests) and shared by
// every fetch task behind an Arc.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;

/// Per-request timeout used when none is given on the command line.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(100);

/// How many pages may be downloading or being written at the same time.
pub const DEFAULT_CONCURRENCY: usize = 32;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// The URL crawled at depth 0
    pub seed: String,
    /// Maximum number of links admitted from a single page
    pub max_urls: usize,
    /// Deepest level that is still fetched (the seed is level 0)
    pub max_depth: usize,
    /// true = a URL may appear once in the whole tree,
    /// false = a file name may appear once per depth
    pub unique: bool,
    /// Directory that receives one subdirectory per depth
    pub root_dir: PathBuf,
    pub concurrency: usize,
    pub request_timeout: Duration,
}

impl CrawlConfig {
    pub fn new(
        seed: impl Into<String>,
        max_urls: usize,
        max_depth: usize,
        unique: bool,
        root_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            seed: seed.into(),
            max_urls,
            max_depth,
            unique,
            root_dir: root_dir.into(),
            concurrency: DEFAULT_CONCURRENCY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    // Builds the config from parsed arguments.
    //
    // The output directory defaults to the process's working directory and is
    // made absolute so every depth directory resolves the same way no matter
    // which task creates it.
    pub fn from_cli(cli: &Cli) -> std::io::Result<Self> {
        let cwd = std::env::current_dir()?;
        let root_dir = match &cli.output_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => cwd.join(dir),
            None => cwd,
        };

        Ok(Self::new(
            cli.initial_url.clone(),
            cli.max_urls,
            cli.max_depth,
            cli.uniqueness,
            root_dir,
        )
        .with_concurrency(cli.concurrency)
        .with_request_timeout(Duration::from_secs(cli.timeout)))
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        // A zero-permit pool would never let the seed through
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Directory that holds the pages found at `depth`: `<root_dir>/<depth>`.
    pub fn dir_for_depth(&self, depth: usize) -> PathBuf {
        self.root_dir.join(depth.to_string())
    }
}
