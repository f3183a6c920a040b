//! Reconcile a saved menu with the live Shopify collections.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::tree::TreeNode;

/// A collection as it currently exists in Shopify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveCollection {
    pub id: String,
    pub title: String,
}

impl LiveCollection {
    /// Create a live collection record.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Merge a saved menu tree with the live collection set.
///
/// - A node whose collection no longer exists is dropped together with its
///   whole subtree; children are not re-parented.
/// - Every surviving node takes the collection's current title as label.
/// - Live collections missing from the tree are appended as root leaves, in
///   `live` order, after the surviving nodes.
///
/// Ids are emitted at most once: a repeated id in `saved` keeps its first
/// pre-order occurrence, a repeated id in `live` is appended once and its
/// first title wins.
#[must_use]
pub fn merge(saved: &[TreeNode], live: &[LiveCollection]) -> Vec<TreeNode> {
    let mut titles: HashMap<&str, &str> = HashMap::with_capacity(live.len());
    for collection in live {
        titles
            .entry(collection.id.as_str())
            .or_insert(collection.title.as_str());
    }

    let mut seen = HashSet::new();
    let mut menu = clean(saved, &titles, &mut seen);

    for collection in live {
        if seen.insert(collection.id.clone()) {
            menu.push(TreeNode::leaf(collection.id.clone(), collection.title.clone()));
        }
    }

    menu
}

fn clean(
    nodes: &[TreeNode],
    titles: &HashMap<&str, &str>,
    seen: &mut HashSet<String>,
) -> Vec<TreeNode> {
    let mut out = Vec::with_capacity(nodes.len());

    for node in nodes {
        let Some(&title) = titles.get(node.id.as_str()) else {
            continue;
        };
        if !seen.insert(node.id.clone()) {
            continue;
        }

        out.push(TreeNode {
            id: node.id.clone(),
            label: title.to_owned(),
            children: clean(&node.children, titles, seen),
        });
    }

    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_missing_relabels_and_appends_new() {
        let saved = vec![TreeNode::with_children(
            "A",
            "Old",
            vec![TreeNode::leaf("B", "Old")],
        )];
        let live = vec![LiveCollection::new("A", "New"), LiveCollection::new("C", "Fresh")];

        assert_eq!(
            merge(&saved, &live),
            vec![TreeNode::leaf("A", "New"), TreeNode::leaf("C", "Fresh")]
        );
    }

    #[test]
    fn test_removed_parent_takes_subtree_with_it() {
        let saved = vec![TreeNode::with_children(
            "A",
            "a",
            vec![TreeNode::leaf("B", "b")],
        )];
        let live = vec![LiveCollection::new("B", "b")];

        // B was under A; it comes back only as a newly appended root
        assert_eq!(merge(&saved, &live), vec![TreeNode::leaf("B", "b")]);
    }

    #[test]
    fn test_keeps_custom_nesting_and_order() {
        let saved = vec![
            TreeNode::leaf("C", "c"),
            TreeNode::with_children("A", "a", vec![TreeNode::leaf("B", "b")]),
        ];
        let live = vec![
            LiveCollection::new("A", "Alpha"),
            LiveCollection::new("B", "Beta"),
            LiveCollection::new("C", "Gamma"),
        ];

        assert_eq!(
            merge(&saved, &live),
            vec![
                TreeNode::leaf("C", "Gamma"),
                TreeNode::with_children("A", "Alpha", vec![TreeNode::leaf("B", "Beta")]),
            ]
        );
    }

    #[test]
    fn test_new_collections_keep_live_order() {
        let live = vec![
            LiveCollection::new("Z", "z"),
            LiveCollection::new("Y", "y"),
            LiveCollection::new("X", "x"),
        ];
        let ids: Vec<_> = merge(&[], &live).into_iter().map(|n| n.id).collect();
        assert_eq!(ids, ["Z", "Y", "X"]);
    }

    #[test]
    fn test_duplicate_ids_emitted_once() {
        let saved = vec![TreeNode::leaf("A", "a"), TreeNode::leaf("A", "a")];
        let live = vec![LiveCollection::new("A", "a"), LiveCollection::new("B", "b"), LiveCollection::new("B", "b")];
        let ids: Vec<_> = merge(&saved, &live).into_iter().map(|n| n.id).collect();
        assert_eq!(ids, ["A", "B"]);
    }

    #[test]
    fn test_empty_live_clears_menu() {
        let saved = vec![TreeNode::leaf("A", "a")];
        assert!(merge(&saved, &[]).is_empty());
    }

    #[test]
    fn test_merge_is_idempotent() {
        let saved = vec![
            TreeNode::with_children("A", "x", vec![TreeNode::leaf("B", "y"), TreeNode::leaf("Q", "q")]),
            TreeNode::leaf("D", "d"),
        ];
        let live = vec![
            LiveCollection::new("D", "Dishwashers"),
            LiveCollection::new("A", "Appliances"),
            LiveCollection::new("B", "Blenders"),
            LiveCollection::new("E", "Extras"),
        ];

        let once = merge(&saved, &live);
        assert_eq!(merge(&once, &live), once);
    }
}
