//! Menu tree node.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One menu entry bound to a Shopify collection.
///
/// Serializes as `{ "id", "label", "children"? }`. `children` is omitted
/// when empty and defaults to empty when absent, so "no children" and
/// "empty children" are the same leaf to every consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Collection GID (e.g., `gid://shopify/Collection/123`).
    pub id: String,
    /// Display text, refreshed from the collection title on merge.
    pub label: String,
    /// Ordered child entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a leaf node.
    #[must_use]
    pub fn leaf(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Create a node with children.
    #[must_use]
    pub fn with_children(
        id: impl Into<String>,
        label: impl Into<String>,
        children: Vec<Self>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children,
        }
    }

    /// Whether this node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Self::subtree_len).sum::<usize>()
    }
}

/// Collect every id in the forest, nested ones included.
#[must_use]
pub fn collect_ids(nodes: &[TreeNode]) -> HashSet<String> {
    fn walk(nodes: &[TreeNode], out: &mut HashSet<String>) {
        for node in nodes {
            out.insert(node.id.clone());
            walk(&node.children, out);
        }
    }

    let mut ids = HashSet::new();
    walk(nodes, &mut ids);
    ids
}

/// Assemble a forest from parent links given by index.
///
/// `parents[i]` is the index entry `i` hangs under. `None`, an index past
/// the end or `i` itself makes the entry a root. Roots and siblings keep
/// index order. Entries whose parent chain loops never reach a root and are
/// left out. `node` builds the entry at an index from its finished children.
pub(super) fn assemble_forest<F>(parents: &[Option<usize>], node: F) -> Vec<TreeNode>
where
    F: Fn(usize, Vec<TreeNode>) -> Option<TreeNode>,
{
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); parents.len()];
    let mut roots = Vec::new();

    for (index, parent) in parents.iter().enumerate() {
        let parent = parent.filter(|&p| p != index);
        match parent.and_then(|p| children.get_mut(p)) {
            Some(siblings) => siblings.push(index),
            None => roots.push(index),
        }
    }

    roots
        .into_iter()
        .filter_map(|index| assemble(&children, index, &node))
        .collect()
}

/// Every index reached here was attached to exactly one parent, so the walk
/// from a root cannot revisit a node.
fn assemble<F>(children: &[Vec<usize>], index: usize, node: &F) -> Option<TreeNode>
where
    F: Fn(usize, Vec<TreeNode>) -> Option<TreeNode>,
{
    let nested = children
        .get(index)
        .map(|kids| {
            kids.iter()
                .filter_map(|&child| assemble(children, child, node))
                .collect()
        })
        .unwrap_or_default();
    node(index, nested)
}
