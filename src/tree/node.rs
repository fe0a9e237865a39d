// src/tree/node.rs
// =============================================================================
// One crawled URL in the link tree.
//
// Nodes are shared between tasks through Arc:
// - the parent's task appends children while it expands the page
// - a child's task removes itself from the parent if its download fails
//
// So the children list sits behind a Mutex. A node never stores a pointer
// back to its parent; the parent is handed to the child's task instead,
// which keeps the tree free of reference cycles.
// =============================================================================

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Where a node is in its crawl lifecycle.
///
/// `Pending -> Fetching -> Written -> Expanding -> Complete`, or `Pruned`
/// when the download or the write fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Pending,
    Fetching,
    Written,
    Expanding,
    Complete,
    Pruned,
}

#[derive(Debug)]
pub struct UrlTreeNode {
    url: String,
    depth: usize,
    dir_path: PathBuf,
    children: Mutex<Vec<Arc<UrlTreeNode>>>,
    state: Mutex<NodeState>,
}

impl UrlTreeNode {
    pub fn new(url: impl Into<String>, depth: usize, dir_path: impl Into<PathBuf>) -> Arc<Self> {
        Arc::new(Self {
            url: url.into(),
            depth,
            dir_path: dir_path.into(),
            children: Mutex::new(Vec::new()),
            state: Mutex::new(NodeState::Pending),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The depth directory this page is saved in.
    pub fn dir_path(&self) -> &Path {
        &self.dir_path
    }

    pub fn add_child(&self, child: Arc<UrlTreeNode>) {
        self.lock_children().push(child);
    }

    // Removes `child` by identity, not by URL: in per-depth mode the same URL
    // can sit under two different parents, and only this exact node must go.
    //
    // Returns true if the child was found.
    pub fn remove_child(&self, child: &Arc<UrlTreeNode>) -> bool {
        let mut children = self.lock_children();
        match children.iter().position(|c| Arc::ptr_eq(c, child)) {
            Some(index) => {
                children.remove(index);
                true
            }
            None => false,
        }
    }

    /// A snapshot of the current children, in the order they were added.
    pub fn children(&self) -> Vec<Arc<UrlTreeNode>> {
        self.lock_children().clone()
    }

    pub fn state(&self) -> NodeState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_state(&self, state: NodeState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    // A panicking task can't leave the Vec half-modified (push and remove
    // either happen or they don't), so a poisoned lock is still usable.
    fn lock_children(&self) -> MutexGuard<'_, Vec<Arc<UrlTreeNode>>> {
        self.children.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(url: &str, depth: usize) -> Arc<UrlTreeNode> {
        UrlTreeNode::new(url, depth, format!("/tmp/{}", depth))
    }

    #[test]
    fn test_new_node_is_pending_and_empty() {
        let root = node("https://example.com", 0);
        assert_eq!(root.url(), "https://example.com");
        assert_eq!(root.depth(), 0);
        assert_eq!(root.dir_path(), Path::new("/tmp/0"));
        assert_eq!(root.state(), NodeState::Pending);
        assert!(root.children().is_empty());
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let root = node("https://example.com", 0);
        root.add_child(node("https://a.com", 1));
        root.add_child(node("https://b.com", 1));
        root.add_child(node("https://c.com", 1));

        let urls: Vec<_> = root.children().iter().map(|c| c.url().to_string()).collect();
        assert_eq!(urls, ["https://a.com", "https://b.com", "https://c.com"]);
    }

    #[test]
    fn test_remove_child_by_identity() {
        let root = node("https://example.com", 0);
        let first = node("https://dup.com", 1);
        let second = node("https://dup.com", 1);
        root.add_child(first.clone());
        root.add_child(second.clone());

        assert!(root.remove_child(&second));

        let children = root.children();
        assert_eq!(children.len(), 1);
        assert!(Arc::ptr_eq(&children[0], &first));
    }

    #[test]
    fn test_remove_missing_child() {
        let root = node("https://example.com", 0);
        root.add_child(node("https://a.com", 1));
        assert!(!root.remove_child(&node("https://a.com", 1)));
        assert_eq!(root.children().len(), 1);
    }

    #[test]
    fn test_concurrent_add_and_remove() {
        let root = node("https://example.com", 0);
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let root = root.clone();
                std::thread::spawn(move || {
                    let child = node(&format!("https://{}.com", i), 1);
                    root.add_child(child.clone());
                    if i % 2 == 0 {
                        assert!(root.remove_child(&child));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(root.children().len(), 4);
    }

    #[test]
    fn test_state_transitions() {
        let n = node("https://example.com", 0);
        n.set_state(NodeState::Fetching);
        n.set_state(NodeState::Pruned);
        assert_eq!(n.state(), NodeState::Pruned);
    }
}
