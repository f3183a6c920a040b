//! Collection menu editor.
//!
//! Glue between the pure menu functions in `magbridge_core::menu`, the
//! version store and the upstream clients. Live collections are passed in
//! by the caller, fetched fresh for every request.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use magbridge_core::{
    DEFAULT_VERSION_PREFIX, LiveCollection, MenuVersionId, ReorderGesture, SourceCategory,
    TreeNode, build_from_source, merge, reorder, version_name,
};

use super::ServiceError;
use crate::db::{MenuVersion, MenuVersionStore, MenuVersionSummary};
use crate::magento::MagentoCategory;

/// What the editor opens with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingMenu {
    /// Selected snapshot merged with the live collections.
    pub tree: Vec<TreeNode>,
    /// Every version of the shop, newest first.
    pub versions: Vec<MenuVersionSummary>,
    /// The snapshot the tree was built from, if any.
    pub selected: Option<MenuVersionSummary>,
}

/// A drag gesture submitted together with the tree it applies to.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub tree: Vec<TreeNode>,
    pub active_id: String,
    #[serde(default)]
    pub over_id: Option<String>,
    #[serde(default)]
    pub horizontal_offset_px: f64,
    /// Falls back to the configured indent width.
    #[serde(default)]
    pub indent_step_px: Option<f64>,
}

impl ReorderRequest {
    /// The gesture, with `default_indent_px` when the client sent none.
    #[must_use]
    pub fn gesture(&self, default_indent_px: f64) -> ReorderGesture {
        ReorderGesture {
            active_id: self.active_id.clone(),
            over_id: self.over_id.clone(),
            horizontal_offset_px: self.horizontal_offset_px,
            indent_step_px: self.indent_step_px.unwrap_or(default_indent_px),
        }
    }
}

/// Load the tree the editor should show.
///
/// Picks the requested version when it belongs to `shop`, else the active
/// version, else the most recent one. Without any snapshot every live
/// collection becomes a root entry.
///
/// # Errors
///
/// Returns `ServiceError::Repository` if the store fails.
#[instrument(skip(store, live), fields(live = live.len()))]
pub async fn load_working_tree<S: MenuVersionStore>(
    store: &S,
    shop: &str,
    requested: Option<MenuVersionId>,
    live: &[LiveCollection],
) -> Result<WorkingMenu, ServiceError> {
    let mut selected = match requested {
        Some(id) => store.get(shop, id).await?,
        None => None,
    };
    if selected.is_none() {
        selected = store.active_or_latest(shop).await?;
    }

    let base = selected.as_ref().map_or(&[][..], |v| v.menu.as_slice());
    let tree = merge(base, live);
    let versions = store.list(shop).await?;

    Ok(WorkingMenu {
        tree,
        versions,
        selected: selected.as_ref().map(MenuVersionSummary::from),
    })
}

/// Store `tree` as the new active version of `shop`.
///
/// # Errors
///
/// Returns `RepositoryError::SaveFailed` (wrapped) when nothing was stored;
/// the previous active version is then unchanged.
#[instrument(skip(store, tree), fields(nodes = tree.len()))]
pub async fn save_tree<S: MenuVersionStore>(
    store: &S,
    shop: &str,
    tree: &[TreeNode],
    now: DateTime<Utc>,
) -> Result<MenuVersion, ServiceError> {
    let name = version_name(DEFAULT_VERSION_PREFIX, now);
    Ok(store.create_active(shop, &name, tree).await?)
}

/// Seed a tree from Magento categories and the category map.
#[must_use]
pub fn tree_from_categories(
    categories: &[MagentoCategory],
    id_map: &HashMap<i64, String>,
) -> Vec<TreeNode> {
    let source: Vec<SourceCategory> = categories.iter().map(SourceCategory::from).collect();
    build_from_source(&source, id_map)
}

/// Apply a gesture submitted from the editor.
#[must_use]
pub fn apply_reorder(request: &ReorderRequest, default_indent_px: f64) -> Vec<TreeNode> {
    reorder(&request.tree, &request.gesture(default_indent_px))
}
