// src/tree/mod.rs
// =============================================================================
// The link tree built by the crawler and its text / JSON renderings.
// =============================================================================

mod node;
mod render;

pub use node::{NodeState, UrlTreeNode};
pub use render::{render_json, render_text, TreeSnapshot};
