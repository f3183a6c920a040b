//! Drag reorder with depth projection.
//!
//! A gesture names the dragged entry, the entry it was dropped on and how
//! far the pointer travelled sideways. The dragged node moves together with
//! all of its descendants; the sideways travel decides how deep it lands.

use serde::{Deserialize, Serialize};

use super::flat::{FlatEntry, flatten, rebuild};
use super::tree::TreeNode;

/// Pixel width of one indentation level when the caller does not send one.
pub const DEFAULT_INDENT_STEP_PX: f64 = 24.0;

const fn default_indent_step_px() -> f64 {
    DEFAULT_INDENT_STEP_PX
}

/// A single drag-and-drop gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderGesture {
    /// Entry being dragged.
    pub active_id: String,
    /// Entry under the pointer at drop time; `None` when dropped outside.
    #[serde(default)]
    pub over_id: Option<String>,
    /// Accumulated horizontal travel, positive to the right.
    #[serde(default)]
    pub horizontal_offset_px: f64,
    /// Width of one indentation level, in the same unit as the offset.
    #[serde(default = "default_indent_step_px")]
    pub indent_step_px: f64,
}

impl ReorderGesture {
    /// Gesture with no sideways travel and the default indent width.
    #[must_use]
    pub fn new(active_id: impl Into<String>, over_id: impl Into<String>) -> Self {
        Self {
            active_id: active_id.into(),
            over_id: Some(over_id.into()),
            horizontal_offset_px: 0.0,
            indent_step_px: DEFAULT_INDENT_STEP_PX,
        }
    }

    /// Set the sideways travel.
    #[must_use]
    pub const fn with_offset(mut self, horizontal_offset_px: f64, indent_step_px: f64) -> Self {
        self.horizontal_offset_px = horizontal_offset_px;
        self.indent_step_px = indent_step_px;
        self
    }

    /// Whole indentation levels the offset asks for.
    #[allow(clippy::cast_possible_truncation)]
    fn depth_steps(&self) -> i64 {
        if !(self.indent_step_px.is_finite() && self.indent_step_px > 0.0) {
            return 0;
        }
        let steps = (self.horizontal_offset_px / self.indent_step_px).round();
        if steps.is_finite() { steps as i64 } else { 0 }
    }
}

/// Apply a drag gesture to the whole tree and return the new tree.
///
/// The gesture is a no-op (the tree comes back unchanged) when there is no
/// drop target, the target is the dragged entry itself, or either id is not
/// in the tree. Collapsed subtrees move with their root because the full
/// tree is flattened, not a visible subset.
///
/// After the move every entry's depth is at most one more than the entry
/// before it, and the first entry is a root.
#[must_use]
pub fn reorder(tree: &[TreeNode], gesture: &ReorderGesture) -> Vec<TreeNode> {
    let Some(over_id) = gesture.over_id.as_deref() else {
        return tree.to_vec();
    };
    if over_id == gesture.active_id {
        return tree.to_vec();
    }

    let mut flat = flatten(tree);
    let from = flat.iter().position(|e| e.id == gesture.active_id);
    let over = flat.iter().position(|e| e.id == over_id);
    let (Some(from), Some(over)) = (from, over) else {
        return tree.to_vec();
    };

    let block_len = block_len(&flat, from);
    let block: Vec<FlatEntry> = flat.drain(from..from + block_len).collect();

    let insert_at = if over < from {
        over
    } else if over >= from + block_len {
        // The block already left; indices past it shifted down.
        (over + 1 - block_len).min(flat.len())
    } else {
        // Dropped onto its own descendant: position stays, depth may change.
        from
    };

    let original_depth = block.first().map_or(0, |e| e.depth);
    let max_depth = insert_at
        .checked_sub(1)
        .and_then(|i| flat.get(i))
        .map_or(0, |prev| prev.depth + 1);
    let depth = project(original_depth, gesture.depth_steps()).clamp(0, max_depth);

    let block = block.into_iter().map(|mut entry| {
        entry.depth = entry.depth.saturating_sub(original_depth) + depth;
        entry
    });
    flat.splice(insert_at..insert_at, block);

    relink(&mut flat);
    rebuild(&flat)
}

/// Number of entries in the subtree rooted at `from`, root included.
fn block_len(flat: &[FlatEntry], from: usize) -> usize {
    let Some(root) = flat.get(from) else {
        return 0;
    };
    1 + flat
        .iter()
        .skip(from + 1)
        .take_while(|e| e.depth > root.depth)
        .count()
}

fn project(depth: usize, steps: i64) -> usize {
    let magnitude = usize::try_from(steps.unsigned_abs()).unwrap_or(usize::MAX);
    if steps >= 0 {
        depth.saturating_add(magnitude)
    } else {
        depth.saturating_sub(magnitude)
    }
}

/// Point every entry at the nearest preceding entry one level up.
fn relink(flat: &mut [FlatEntry]) {
    let mut last_at_depth: Vec<Option<String>> = Vec::new();

    for entry in flat.iter_mut() {
        entry.parent_id = entry
            .depth
            .checked_sub(1)
            .and_then(|d| last_at_depth.get(d))
            .cloned()
            .flatten();

        if last_at_depth.len() <= entry.depth {
            last_at_depth.resize(entry.depth + 1, None);
        }
        if let Some(slot) = last_at_depth.get_mut(entry.depth) {
            *slot = Some(entry.id.clone());
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn ids_and_depths(tree: &[TreeNode]) -> Vec<(String, usize)> {
        flatten(tree).into_iter().map(|e| (e.id, e.depth)).collect()
    }

    fn pairs(expected: &[(&str, usize)]) -> Vec<(String, usize)> {
        expected.iter().map(|&(id, d)| (id.to_string(), d)).collect()
    }

    /// A(B), C
    fn a_with_b_then_c() -> Vec<TreeNode> {
        vec![
            TreeNode::with_children("A", "a", vec![TreeNode::leaf("B", "b")]),
            TreeNode::leaf("C", "c"),
        ]
    }

    #[test]
    fn test_moves_block_forward_past_sibling() {
        let tree = reorder(&a_with_b_then_c(), &ReorderGesture::new("A", "C"));
        assert_eq!(
            ids_and_depths(&tree),
            pairs(&[("C", 0), ("A", 0), ("B", 1)])
        );
        assert_eq!(
            tree,
            vec![
                TreeNode::leaf("C", "c"),
                TreeNode::with_children("A", "a", vec![TreeNode::leaf("B", "b")]),
            ]
        );
    }

    #[test]
    fn test_moves_block_backward() {
        let tree = vec![
            TreeNode::leaf("X", "x"),
            TreeNode::with_children("A", "a", vec![TreeNode::leaf("B", "b")]),
        ];
        let moved = reorder(&tree, &ReorderGesture::new("A", "X"));
        assert_eq!(
            ids_and_depths(&moved),
            pairs(&[("A", 0), ("B", 1), ("X", 0)])
        );
    }

    #[test]
    fn test_right_drag_nests_under_previous() {
        let tree = vec![TreeNode::leaf("A", "a"), TreeNode::leaf("B", "b")];
        let gesture = ReorderGesture::new("B", "A").with_offset(30.0, 24.0);
        // B lands before A at index 0, where nesting is impossible
        let moved = reorder(&tree, &gesture);
        assert_eq!(ids_and_depths(&moved), pairs(&[("B", 0), ("A", 0)]));

        let tree = vec![
            TreeNode::leaf("A", "a"),
            TreeNode::leaf("B", "b"),
            TreeNode::leaf("C", "c"),
        ];
        let gesture = ReorderGesture::new("C", "B").with_offset(24.0, 24.0);
        let moved = reorder(&tree, &gesture);
        assert_eq!(
            moved,
            vec![
                TreeNode::with_children("A", "a", vec![TreeNode::leaf("C", "c")]),
                TreeNode::leaf("B", "b"),
            ]
        );
    }

    #[test]
    fn test_depth_clamped_to_one_below_previous() {
        let tree = vec![TreeNode::leaf("A", "a"), TreeNode::leaf("B", "b"), TreeNode::leaf("C", "c")];
        let gesture = ReorderGesture::new("C", "B").with_offset(24.0 * 5.0, 24.0);
        let moved = reorder(&tree, &gesture);
        assert_eq!(
            ids_and_depths(&moved),
            pairs(&[("A", 0), ("C", 1), ("B", 0)])
        );
    }

    #[test]
    fn test_left_drag_outdents_with_descendants() {
        let tree = vec![TreeNode::with_children(
            "A",
            "a",
            vec![TreeNode::with_children(
                "B",
                "b",
                vec![TreeNode::leaf("C", "c")],
            )],
        )];
        // B dropped on its own child: order stays, depth projection applies
        let gesture = ReorderGesture::new("B", "C").with_offset(-24.0, 24.0);
        let moved = reorder(&tree, &gesture);
        assert_eq!(
            moved,
            vec![
                TreeNode::leaf("A", "a"),
                TreeNode::with_children("B", "b", vec![TreeNode::leaf("C", "c")]),
            ]
        );
    }

    /// A(B(C)), D
    fn deep_chain_then_d() -> Vec<TreeNode> {
        vec![
            TreeNode::with_children(
                "A",
                "a",
                vec![TreeNode::with_children("B", "b", vec![TreeNode::leaf("C", "c")])],
            ),
            TreeNode::leaf("D", "d"),
        ]
    }

    #[test]
    fn test_following_entry_keeps_its_parent() {
        let moved = reorder(&deep_chain_then_d(), &ReorderGesture::new("D", "C"));
        assert_eq!(moved, deep_chain_then_d());
    }

    #[test]
    fn test_left_drag_can_land_at_root_before_deeper_entry() {
        let gesture = ReorderGesture::new("D", "C").with_offset(-48.0, 24.0);
        let flat: Vec<(String, usize, Option<String>)> = flatten(&reorder(&deep_chain_then_d(), &gesture))
            .into_iter()
            .map(|e| (e.id, e.depth, e.parent_id))
            .collect();
        assert_eq!(
            flat,
            vec![
                ("A".to_string(), 0, None),
                ("B".to_string(), 1, Some("A".to_string())),
                ("C".to_string(), 2, Some("B".to_string())),
                ("D".to_string(), 0, None),
            ]
        );

    }

    #[test]
    fn test_half_step_rounds_away_from_zero() {
        let tree = vec![TreeNode::leaf("A", "a"), TreeNode::leaf("B", "b"), TreeNode::leaf("C", "c")];
        let right = ReorderGesture::new("C", "B").with_offset(12.0, 24.0);
        assert_eq!(ids_and_depths(&reorder(&tree, &right))[1], ("C".to_string(), 1));

        let left = ReorderGesture::new("C", "B").with_offset(11.9, 24.0);
        assert_eq!(ids_and_depths(&reorder(&tree, &left))[1], ("C".to_string(), 0));
    }

    #[test]
    fn test_degenerate_step_ignores_offset() {
        let tree = vec![TreeNode::leaf("A", "a"), TreeNode::leaf("B", "b"), TreeNode::leaf("C", "c")];
        for step in [0.0, -24.0, f64::NAN, f64::INFINITY] {
            let gesture = ReorderGesture::new("C", "B").with_offset(100.0, step);
            assert_eq!(
                ids_and_depths(&reorder(&tree, &gesture)),
                pairs(&[("A", 0), ("C", 0), ("B", 0)])
            );
        }
    }

    #[test]
    fn test_noop_cases_return_input() {
        let tree = a_with_b_then_c();

        let mut no_target = ReorderGesture::new("A", "C");
        no_target.over_id = None;
        assert_eq!(reorder(&tree, &no_target), tree);

        assert_eq!(reorder(&tree, &ReorderGesture::new("A", "A")), tree);
        assert_eq!(reorder(&tree, &ReorderGesture::new("missing", "C")), tree);
        assert_eq!(reorder(&tree, &ReorderGesture::new("A", "missing")), tree);
    }

    #[test]
    fn test_collapsed_subtree_moves_whole() {
        let tree = vec![
            TreeNode::with_children(
                "A",
                "a",
                vec![
                    TreeNode::with_children("B", "b", vec![TreeNode::leaf("C", "c")]),
                    TreeNode::leaf("D", "d"),
                ],
            ),
            TreeNode::leaf("E", "e"),
            TreeNode::leaf("F", "f"),
        ];
        let moved = reorder(&tree, &ReorderGesture::new("A", "F"));
        assert_eq!(
            ids_and_depths(&moved),
            pairs(&[("E", 0), ("F", 0), ("A", 0), ("B", 1), ("C", 2), ("D", 1)])
        );
    }

    #[test]
    fn test_gesture_json_defaults() {
        let gesture: ReorderGesture = serde_json::from_str(r#"{"activeId":"A","overId":"B"}"#).unwrap();
        assert_eq!(gesture, ReorderGesture::new("A", "B"));

        let gesture: ReorderGesture =
            serde_json::from_str(r#"{"activeId":"A","overId":null,"horizontalOffsetPx":-12.5,"indentStepPx":16}"#)
                .unwrap();
        assert!(gesture.over_id.is_none());
        assert!((gesture.indent_step_px - 16.0).abs() < f64::EPSILON);
    }
}
