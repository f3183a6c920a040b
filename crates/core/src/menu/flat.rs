//! Tree ⇄ flat list transform.
//!
//! The flat view is a pre-order walk where every entry carries its depth
//! and the id of its enclosing node. Reordering works on this view because
//! a subtree is always one contiguous run of entries.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::tree::{TreeNode, assemble_forest};

/// One tree node in pre-order position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatEntry {
    pub id: String,
    pub label: String,
    /// Enclosing node, `None` for roots.
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Nesting level; roots are 0.
    pub depth: usize,
}

/// Flatten a forest into pre-order entries.
///
/// Each node is emitted before its children; depth starts at 0 and grows by
/// one per level.
#[must_use]
pub fn flatten(tree: &[TreeNode]) -> Vec<FlatEntry> {
    fn walk(nodes: &[TreeNode], parent_id: Option<&str>, depth: usize, out: &mut Vec<FlatEntry>) {
        for node in nodes {
            out.push(FlatEntry {
                id: node.id.clone(),
                label: node.label.clone(),
                parent_id: parent_id.map(str::to_owned),
                depth,
            });
            walk(&node.children, Some(node.id.as_str()), depth + 1, out);
        }
    }

    let mut out = Vec::with_capacity(tree.iter().map(TreeNode::subtree_len).sum());
    walk(tree, None, 0, &mut out);
    out
}

/// Rebuild a forest from flat entries.
///
/// Entries are attached to the entry named by `parent_id`, keeping their
/// relative input order among siblings. A `parent_id` that names no entry
/// (or the entry itself) turns the entry into a root instead of failing.
/// When an id repeats, children addressed to it go to its first entry.
/// `depth` is ignored here; `parent_id` alone defines the shape.
#[must_use]
pub fn rebuild(flat: &[FlatEntry]) -> Vec<TreeNode> {
    let mut index_by_id: HashMap<&str, usize> = HashMap::with_capacity(flat.len());
    for (index, entry) in flat.iter().enumerate() {
        index_by_id.entry(entry.id.as_str()).or_insert(index);
    }

    let parents: Vec<Option<usize>> = flat
        .iter()
        .map(|entry| {
            entry
                .parent_id
                .as_deref()
                .and_then(|id| index_by_id.get(id).copied())
        })
        .collect();

    assemble_forest(&parents, |index, children| {
        flat.get(index).map(|entry| TreeNode {
            id: entry.id.clone(),
            label: entry.label.clone(),
            children,
        })
    })
}
