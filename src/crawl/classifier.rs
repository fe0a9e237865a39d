// src/crawl/classifier.rs
// =============================================================================
// Decides whether a link found on a page becomes a new node in the tree.
//
// A link is admitted when:
// 1. it parses as an absolute URL with an http or https scheme, and
// 2. it passes the dedup policy:
//    - global mode:    the URL was never admitted before (the seed counts)
//    - per-depth mode: no link found at this depth produced the same file name
//
// Check and insert happen under one lock, so two tasks racing on the same
// link can never both admit it.
// =============================================================================

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};
use url::Url;

use crate::persist::safe_filename;

#[derive(Debug)]
enum DedupState {
    Global(Mutex<HashSet<String>>),
    // (depth of the page the link was found on, derived file name)
    PerDepth(Mutex<HashSet<(usize, String)>>),
}

#[derive(Debug)]
pub struct UrlClassifier {
    dedup: DedupState,
}

impl UrlClassifier {
    /// Global mode: every URL is admitted at most once in the whole crawl.
    /// The seed is marked as seen up front.
    pub fn global(seed: &str) -> Self {
        let mut seen = HashSet::new();
        seen.insert(seed.to_string());
        Self {
            dedup: DedupState::Global(Mutex::new(seen)),
        }
    }

    /// Per-depth mode: a derived file name is admitted at most once per depth.
    pub fn per_depth() -> Self {
        Self {
            dedup: DedupState::PerDepth(Mutex::new(HashSet::new())),
        }
    }

    pub fn new(unique: bool, seed: &str) -> Self {
        if unique {
            Self::global(seed)
        } else {
            Self::per_depth()
        }
    }

    // Returns true if `href`, found on a page at `depth`, should be crawled.
    //
    // Links that don't parse, or use another scheme (mailto:, javascript:,
    // ftp:, relative paths, ...), are rejected without touching the dedup set.
    pub fn admit(&self, href: &str, depth: usize) -> bool {
        if !is_crawlable(href) {
            return false;
        }

        match &self.dedup {
            DedupState::Global(seen) => seen
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(href.to_string()),
            DedupState::PerDepth(seen) => {
                let Ok(file_name) = safe_filename(href) else {
                    return false;
                };
                seen.lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert((depth, file_name))
            }
        }
    }
}

fn is_crawlable(href: &str) -> bool {
    match Url::parse(href) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_rejects_non_http_schemes() {
        let classifier = UrlClassifier::global("https://seed.com");
        assert!(!classifier.admit("mailto:x@y.com", 0));
        assert!(!classifier.admit("javascript:void(0)", 0));
        assert!(!classifier.admit("ftp://files.example.com/a", 0));
        assert!(!classifier.admit("tel:+123456", 0));
    }

    #[test]
    fn test_rejects_relative_and_malformed() {
        let classifier = UrlClassifier::per_depth();
        assert!(!classifier.admit("/docs", 0));
        assert!(!classifier.admit("#section", 0));
        assert!(!classifier.admit("http://", 0));
        assert!(!classifier.admit("", 0));
    }

    #[test]
    fn test_global_mode_admits_once() {
        let classifier = UrlClassifier::global("https://seed.com");
        assert!(classifier.admit("https://a.com/x", 0));
        assert!(!classifier.admit("https://a.com/x", 0));
        // Different depth does not matter in global mode
        assert!(!classifier.admit("https://a.com/x", 3));
        // Query strings make a different URL
        assert!(classifier.admit("https://a.com/x?page=2", 0));
    }

    #[test]
    fn test_global_mode_seed_is_seen() {
        let classifier = UrlClassifier::global("https://seed.com/");
        assert!(!classifier.admit("https://seed.com/", 0));
    }

    #[test]
    fn test_per_depth_mode_dedups_file_names() {
        let classifier = UrlClassifier::per_depth();
        assert!(classifier.admit("https://a.com/x?page=1", 0));
        // Same host + path -> same file name at the same depth
        assert!(!classifier.admit("https://a.com/x?page=2", 0));
        assert!(!classifier.admit("http://a.com/x", 0));
        // ...but allowed again one level down
        assert!(classifier.admit("https://a.com/x", 1));
    }

    #[test]
    fn test_per_depth_keys_do_not_collide_across_depths() {
        // "1" + "2x" and "12" + "x" would collide as concatenated strings
        let classifier = UrlClassifier::per_depth();
        assert!(classifier.admit("http://2x/", 1));
        assert!(classifier.admit("http://x/", 12));
    }

    #[test]
    fn test_per_depth_mode_tells_empty_path_from_root_path() {
        let classifier = UrlClassifier::per_depth();
        assert!(classifier.admit("http://a.com", 0));
        assert!(classifier.admit("http://a.com/", 0));
        assert!(!classifier.admit("http://a.com", 0));
        // Host case is kept, so these are different file names too
        assert!(classifier.admit("http://A.com/", 0));
    }

    #[test]
    fn test_per_depth_mode_does_not_seed() {
        let classifier = UrlClassifier::new(false, "https://seed.com/");
        assert!(classifier.admit("https://seed.com/", 0));
    }

    #[test]
    fn test_concurrent_admission_is_atomic() {
        for unique in [true, false] {
            let classifier = Arc::new(UrlClassifier::new(unique, "https://seed.com"));
            let handles: Vec<_> = (0..16)
                .map(|_| {
                    let classifier = classifier.clone();
                    std::thread::spawn(move || classifier.admit("https://race.com/page", 1))
                })
                .collect();

            let admitted = handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|&admitted| admitted)
                .count();
            assert_eq!(admitted, 1);
        }
    }
}
