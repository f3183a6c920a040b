//! Property-based invariant tests for the collection menu tree.
//!
//! 1. Tree → flat → tree is lossless.
//! 2. Reorder moves a node together with all of its descendants, in order.
//! 3. After reorder every entry is at most one level below its predecessor
//!    and the first entry is a root.
//! 4. Reorder never loses or duplicates an entry.
//! 5. Merge is idempotent for a fixed live set.
//! 6. Merge output holds every live id exactly once and nothing else.

use std::collections::{HashMap, HashSet};

use magbridge_core::menu::{
    FlatEntry, LiveCollection, ReorderGesture, TreeNode, flatten, merge, rebuild, reorder,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

/// Turn raw depth wishes into a well-formed pre-order sequence and rebuild it.
fn tree_from_depths(raw: &[usize]) -> Vec<TreeNode> {
    let mut flat: Vec<FlatEntry> = Vec::with_capacity(raw.len());
    let mut last_at_depth: Vec<String> = Vec::new();

    for (i, &wish) in raw.iter().enumerate() {
        let depth = flat.last().map_or(0, |prev| wish.min(prev.depth + 1));
        last_at_depth.truncate(depth);
        let id = format!("n{i}");
        flat.push(FlatEntry {
            id: id.clone(),
            label: format!("Label {i}"),
            parent_id: last_at_depth.last().cloned(),
            depth,
        });
        last_at_depth.push(id);
    }

    rebuild(&flat)
}

fn tree_strategy() -> impl Strategy<Value = Vec<TreeNode>> {
    prop::collection::vec(0usize..5, 0..30).prop_map(|raw| tree_from_depths(&raw))
}

fn live_strategy() -> impl Strategy<Value = Vec<LiveCollection>> {
    prop::collection::vec(0usize..40, 0..25).prop_map(|keys| {
        keys.into_iter()
            .map(|k| LiveCollection::new(format!("n{k}"), format!("Title {k}")))
            .collect()
    })
}

/// Pre-order ids below `id`, or `None` if `id` is absent.
fn descendants(tree: &[TreeNode], id: &str) -> Option<Vec<String>> {
    for node in tree {
        if node.id == id {
            return Some(flatten(&node.children).into_iter().map(|e| e.id).collect());
        }
        if let Some(found) = descendants(&node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Whether `needle` appears in `haystack` in order, gaps allowed.
fn is_subsequence(needle: &[String], haystack: &[String]) -> bool {
    let mut rest = haystack.iter();
    needle.iter().all(|id| rest.any(|candidate| candidate == id))
}

fn ids(tree: &[TreeNode]) -> Vec<String> {
    flatten(tree).into_iter().map(|e| e.id).collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Round trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn flatten_rebuild_roundtrip(tree in tree_strategy()) {
        prop_assert_eq!(rebuild(&flatten(&tree)), tree.clone());

        let flat = flatten(&tree);
        prop_assert_eq!(flatten(&rebuild(&flat)), flat);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2-4. Reorder
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn reorder_keeps_block_intact(
        tree in tree_strategy(),
        active in any::<prop::sample::Index>(),
        over in any::<prop::sample::Index>(),
        offset in -120.0f64..120.0,
    ) {
        let order = ids(&tree);
        prop_assume!(!order.is_empty());
        let active_id = &order[active.index(order.len())];
        let over_id = &order[over.index(order.len())];

        let before = descendants(&tree, active_id).unwrap_or_default();
        let gesture = ReorderGesture::new(active_id.as_str(), over_id.as_str()).with_offset(offset, 24.0);
        let after = descendants(&reorder(&tree, &gesture), active_id).unwrap_or_default();

        // Entries near the drop point may be adopted, but every old
        // descendant stays below the node in the same relative order.
        prop_assert!(
            is_subsequence(&before, &after),
            "descendants of {} changed (over {}, offset {}): {:?} -> {:?}",
            active_id, over_id, offset, before, after
        );
    }
}

proptest! {
    #[test]
    fn reorder_respects_depth_bound(
        tree in tree_strategy(),
        active in any::<prop::sample::Index>(),
        over in any::<prop::sample::Index>(),
        offset in -200.0f64..200.0,
    ) {
        let order = ids(&tree);
        prop_assume!(!order.is_empty());
        let gesture = ReorderGesture::new(
            order[active.index(order.len())].as_str(),
            order[over.index(order.len())].as_str(),
        )
        .with_offset(offset, 24.0);

        let flat = flatten(&reorder(&tree, &gesture));
        if let Some(first) = flat.first() {
            prop_assert_eq!(first.depth, 0);
        }
        for pair in flat.windows(2) {
            prop_assert!(
                pair[1].depth <= pair[0].depth + 1,
                "{} at depth {} follows {} at depth {}",
                pair[1].id, pair[1].depth, pair[0].id, pair[0].depth
            );
        }
    }
}

proptest! {
    #[test]
    fn reorder_is_a_permutation(
        tree in tree_strategy(),
        active in any::<prop::sample::Index>(),
        over in any::<prop::sample::Index>(),
        offset in -200.0f64..200.0,
    ) {
        let order = ids(&tree);
        prop_assume!(!order.is_empty());
        let gesture = ReorderGesture::new(
            order[active.index(order.len())].as_str(),
            order[over.index(order.len())].as_str(),
        )
        .with_offset(offset, 24.0);

        let mut before = order.clone();
        let mut after = ids(&reorder(&tree, &gesture));
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5-6. Merge
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn merge_is_idempotent(tree in tree_strategy(), live in live_strategy()) {
        let once = merge(&tree, &live);
        prop_assert_eq!(merge(&once, &live), once);
    }
}

proptest! {
    #[test]
    fn merge_holds_every_live_id_once(tree in tree_strategy(), live in live_strategy()) {
        let merged = ids(&merge(&tree, &live));

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for id in &merged {
            *counts.entry(id.as_str()).or_default() += 1;
        }
        let live_ids: HashSet<&str> = live.iter().map(|c| c.id.as_str()).collect();

        prop_assert_eq!(counts.len(), live_ids.len());
        for id in &live_ids {
            prop_assert_eq!(counts.get(id).copied(), Some(1), "live id {} not present once", id);
        }
    }
}
