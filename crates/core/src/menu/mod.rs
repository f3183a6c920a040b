//! Collection menu tree.
//!
//! The menu is an ordered forest of [`TreeNode`]s, one per Shopify
//! collection. It is stored as JSON (`[{ id, label, children? }]`) inside a
//! menu version snapshot and edited through a flat, depth-annotated view.
//!
//! # Operations
//!
//! - [`flatten`] / [`rebuild`] - tree ⇄ pre-order flat list
//! - [`merge`] - reconcile a saved tree with the live collection set
//! - [`build_from_source`] - seed a tree from Magento categories
//! - [`reorder`] - apply a drag gesture, moving whole subtrees
//!
//! Array order is position everywhere in this module: `Vec` keeps insertion
//! order, so sibling order is never stored separately.

mod flat;
mod merge;
mod reorder;
mod source;
mod tree;
mod version;

pub use flat::{FlatEntry, flatten, rebuild};
pub use merge::{LiveCollection, merge};
pub use reorder::{DEFAULT_INDENT_STEP_PX, ReorderGesture, reorder};
pub use source::{SourceCategory, build_from_source, lenient_id};
pub use tree::{TreeNode, collect_ids};
pub use version::{DEFAULT_VERSION_PREFIX, version_name};
