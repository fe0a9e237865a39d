// src/crawl/engine.rs
// =============================================================================
// The crawl engine: recursive fetch-and-expand over spawned tokio tasks.
//
// For every node:
// 1. wait for a slot in the download pool, download the page, save it
// 2. release the slot
// 3. if the node is above the depth limit, walk the page's links in
//    document order, admit up to `max_urls` of them, attach each admitted
//    link as a child and spawn a task for it
// 4. wait for every child task to finish
//
// If step 1 fails the node removes itself from its parent (or, for the seed,
// the crawl ends with no tree). The pool slot is not held while waiting for
// children, so a small pool can't deadlock a deep tree and the final tree is
// the same whatever the pool size is.
// =============================================================================

use futures::future::{BoxFuture, FutureExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::classifier::UrlClassifier;
use super::fetcher::PageFetcher;
use super::links::extract_hrefs;
use crate::config::CrawlConfig;
use crate::error::{CrawlError, Result};
use crate::persist::persist;
use crate::tree::{NodeState, UrlTreeNode};

#[derive(Debug, Default)]
struct CrawlStats {
    pages_written: AtomicUsize,
    pages_pruned: AtomicUsize,
    links_admitted: AtomicUsize,
}

/// What a finished crawl produced.
#[derive(Debug)]
pub struct CrawlReport {
    /// The link tree, or None when the seed itself could not be crawled
    pub tree: Option<Arc<UrlTreeNode>>,
    pub pages_written: usize,
    pub pages_pruned: usize,
    pub links_admitted: usize,
    pub elapsed: Duration,
}

#[derive(Debug)]
pub struct Crawler {
    config: CrawlConfig,
    fetcher: PageFetcher,
    classifier: UrlClassifier,
    pool: Semaphore,
    stats: CrawlStats,
}

impl Crawler {
    pub fn new(config: CrawlConfig) -> Result<Self> {
        let fetcher = PageFetcher::new(config.request_timeout)?;
        let classifier = UrlClassifier::new(config.unique, &config.seed);
        let pool = Semaphore::new(config.concurrency);

        Ok(Self {
            config,
            fetcher,
            classifier,
            pool,
            stats: CrawlStats::default(),
        })
    }

    // Crawls from the seed and returns once every task has settled.
    pub async fn run(self) -> CrawlReport {
        let started = Instant::now();
        let crawler = Arc::new(self);
        let config = &crawler.config;

        info!(
            seed = %config.seed,
            max_urls = config.max_urls,
            max_depth = config.max_depth,
            unique = config.unique,
            root_dir = %config.root_dir.display(),
            "starting crawl"
        );

        let root = UrlTreeNode::new(config.seed.clone(), 0, config.dir_for_depth(0));

        let tree = match tokio::spawn(Arc::clone(&crawler).fetch(None, Arc::clone(&root))).await {
            Ok(()) if root.state() != NodeState::Pruned => Some(root),
            Ok(()) => {
                warn!(seed = %crawler.config.seed, "seed page could not be crawled");
                None
            }
            Err(e) => {
                warn!(seed = %crawler.config.seed, error = %e, "seed task failed");
                None
            }
        };

        let report = CrawlReport {
            tree,
            pages_written: crawler.stats.pages_written.load(Ordering::Relaxed),
            pages_pruned: crawler.stats.pages_pruned.load(Ordering::Relaxed),
            links_admitted: crawler.stats.links_admitted.load(Ordering::Relaxed),
            elapsed: started.elapsed(),
        };

        info!(
            pages_written = report.pages_written,
            pages_pruned = report.pages_pruned,
            links_admitted = report.links_admitted,
            elapsed = ?report.elapsed,
            "crawl finished"
        );

        report
    }

    // Crawls `node` and, transitively, everything below it.
    //
    // `parent` is the node that admitted this one; it is only used to detach
    // `node` when the download or the write fails. The future is boxed
    // because it spawns copies of itself.
    fn fetch(
        self: Arc<Self>,
        parent: Option<Arc<UrlTreeNode>>,
        node: Arc<UrlTreeNode>,
    ) -> BoxFuture<'static, ()> {
        async move {
            let html = match self.download(&node).await {
                Ok(html) => html,
                Err(e) => {
                    debug!(url = node.url(), depth = node.depth(), error = %e, "pruning page");
                    node.set_state(NodeState::Pruned);
                    self.stats.pages_pruned.fetch_add(1, Ordering::Relaxed);
                    if let Some(parent) = parent {
                        parent.remove_child(&node);
                    }
                    return;
                }
            };

            if node.depth() < self.config.max_depth {
                self.expand(&node, &html).await;
            }

            node.set_state(NodeState::Complete);
        }
        .boxed()
    }

    // Downloads and saves one page while holding a pool slot.
    async fn download(&self, node: &UrlTreeNode) -> Result<String> {
        let _permit = self
            .pool
            .acquire()
            .await
            .map_err(|_| CrawlError::PoolClosed)?;

        node.set_state(NodeState::Fetching);
        let html = self.fetcher.fetch(node.url()).await?;

        let path = persist(node.dir_path(), node.url(), &html).await?;
        node.set_state(NodeState::Written);
        self.stats.pages_written.fetch_add(1, Ordering::Relaxed);
        debug!(url = node.url(), path = %path.display(), "saved page");

        Ok(html)
    }

    // Admits links from `html` as children of `node` and crawls them.
    //
    // The cap counts admitted links only: rejected links (wrong scheme,
    // duplicates) don't use up any of the `max_urls` slots.
    async fn expand(self: &Arc<Self>, node: &Arc<UrlTreeNode>, html: &str) {
        node.set_state(NodeState::Expanding);

        let child_depth = node.depth() + 1;
        let child_dir = self.config.dir_for_depth(child_depth);
        let mut tasks = JoinSet::new();
        let mut admitted = 0;

        for href in extract_hrefs(html) {
            if admitted == self.config.max_urls {
                break;
            }
            if !self.classifier.admit(&href, node.depth()) {
                continue;
            }
            admitted += 1;

            debug!(parent = node.url(), url = %href, depth = child_depth, "admitted link");
            let child = UrlTreeNode::new(href, child_depth, child_dir.clone());
            node.add_child(Arc::clone(&child));
            tasks.spawn(Arc::clone(self).fetch(Some(Arc::clone(node)), child));
        }

        self.stats.links_admitted.fetch_add(admitted, Ordering::Relaxed);

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                warn!(parent = node.url(), error = %e, "crawl task failed");
            }
        }
    }
}

/// Builds a crawler for `config` and runs it to completion.
pub async fn crawl(config: CrawlConfig) -> Result<CrawlReport> {
    Ok(Crawler::new(config)?.run().await)
}
