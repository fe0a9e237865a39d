// src/tree/render.rs
// =============================================================================
// Turns a finished crawl tree into text.
//
// Text form (pre-order, one line per node):
//
//   |-- URL: https://example.com, Depth: 0
//   |   |-- URL: https://example.com/a, Depth: 1
//   |   |   |-- URL: https://example.com/a/b, Depth: 2
//   |   |-- URL: https://example.com/c, Depth: 1
//
// JSON form: nested {"url", "depth", "children"} objects.
//
// Both run after every task has finished, so they never see a node that is
// still being expanded.
// =============================================================================

use serde::Serialize;

use super::node::UrlTreeNode;

const BRANCH: &str = "|-- ";
const INDENT: &str = "|   ";

/// Renders the tree rooted at `root` in the indented text form.
pub fn render_text(root: &UrlTreeNode) -> String {
    let mut out = String::new();
    write_node(root, "", &mut out);
    out
}

fn write_node(node: &UrlTreeNode, indent: &str, out: &mut String) {
    out.push_str(indent);
    out.push_str(BRANCH);
    out.push_str(&format!("URL: {}, Depth: {}\n", node.url(), node.depth()));

    let child_indent = format!("{}{}", indent, INDENT);
    for child in node.children() {
        write_node(&child, &child_indent, out);
    }
}

// Owned copy of the tree that serde can walk without touching the locks.
#[derive(Debug, Serialize)]
pub struct TreeSnapshot {
    pub url: String,
    pub depth: usize,
    pub children: Vec<TreeSnapshot>,
}

impl From<&UrlTreeNode> for TreeSnapshot {
    fn from(node: &UrlTreeNode) -> Self {
        Self {
            url: node.url().to_string(),
            depth: node.depth(),
            children: node
                .children()
                .iter()
                .map(|child| TreeSnapshot::from(child.as_ref()))
                .collect(),
        }
    }
}

/// Renders the tree rooted at `root` as pretty-printed JSON.
pub fn render_json(root: &UrlTreeNode) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&TreeSnapshot::from(root))
}
