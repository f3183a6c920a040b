//! Collection menu editor endpoints.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use magbridge_core::{LiveCollection, MenuVersionId, TreeNode};

use super::magento_site;
use crate::db::{CategoryMapRepository, MenuVersionRepository, MenuVersionStore, MenuVersionSummary};
use crate::error::AppError;
use crate::services::category_menu::{self, ReorderRequest, WorkingMenu};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/category-menu", get(show).post(save))
        .route("/api/category-menu/versions", get(versions))
        .route("/api/category-menu/reorder", post(reorder))
        .route("/api/category-menu/build-from-magento", post(build_from_magento))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowQuery {
    /// Unparseable ids are ignored.
    #[serde(default)]
    pub version_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub tree: Vec<TreeNode>,
}

#[derive(Debug, Serialize)]
pub struct TreeResponse {
    pub tree: Vec<TreeNode>,
}

async fn live_collections(state: &AppState) -> Result<Vec<LiveCollection>, AppError> {
    let collections = state.shopify().list_all_collections().await?;
    Ok(collections.into_iter().map(LiveCollection::from).collect())
}

/// Working tree for the editor.
async fn show(
    State(state): State<AppState>,
    Query(query): Query<ShowQuery>,
) -> Result<Json<WorkingMenu>, AppError> {
    let requested = query
        .version_id
        .as_deref()
        .and_then(|raw| raw.trim().parse::<MenuVersionId>().ok());
    let live = live_collections(&state).await?;
    let store = MenuVersionRepository::new(state.pool());

    let menu =
        category_menu::load_working_tree(&store, state.config().shop(), requested, &live).await?;
    Ok(Json(menu))
}

/// Store the submitted tree as the new active version.
async fn save(
    State(state): State<AppState>,
    Json(body): Json<SaveRequest>,
) -> Result<Json<MenuVersionSummary>, AppError> {
    let store = MenuVersionRepository::new(state.pool());
    let version =
        category_menu::save_tree(&store, state.config().shop(), &body.tree, Utc::now()).await?;
    Ok(Json(MenuVersionSummary::from(&version)))
}

async fn versions(State(state): State<AppState>) -> Result<Json<Vec<MenuVersionSummary>>, AppError> {
    let store = MenuVersionRepository::new(state.pool());
    Ok(Json(store.list(state.config().shop()).await?))
}

async fn reorder(
    State(state): State<AppState>,
    Json(body): Json<ReorderRequest>,
) -> Json<TreeResponse> {
    let tree = category_menu::apply_reorder(&body, state.config().menu.indent_width_px);
    Json(TreeResponse { tree })
}

/// Seed a tree from the Magento category hierarchy. Nothing is saved.
async fn build_from_magento(State(state): State<AppState>) -> Result<Json<TreeResponse>, AppError> {
    let site = magento_site(&state).await?;
    let categories = state.magento().categories(&site).await?;
    let id_map = CategoryMapRepository::new(state.pool()).id_map().await?;

    let tree = category_menu::tree_from_categories(&categories, &id_map);
    tracing::info!(roots = tree.len(), "Built menu from Magento categories");
    Ok(Json(TreeResponse { tree }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support::{app, body_json, post_json};

    #[tokio::test]
    async fn test_reorder_uses_configured_indent() {
        let body = serde_json::json!({
            "tree": [
                {"id": "A", "label": "A"},
                {"id": "B", "label": "B"},
                {"id": "C", "label": "C"}
            ],
            "activeId": "C",
            "overId": "B",
            "horizontalOffsetPx": 30.0
        });
        let response = post_json(app(), "/api/category-menu/reorder", &body).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(
            json,
            serde_json::json!({"tree": [
                {"id": "A", "label": "A", "children": [{"id": "C", "label": "C"}]},
                {"id": "B", "label": "B"}
            ]})
        );
    }

    #[tokio::test]
    async fn test_reorder_with_unknown_id_returns_tree_unchanged() {
        let body = serde_json::json!({
            "tree": [{"id": "A", "label": "A"}],
            "activeId": "missing",
            "overId": "A",
            "horizontalOffsetPx": 0.0,
            "indentStepPx": 24.0
        });
        let json = body_json(post_json(app(), "/api/category-menu/reorder", &body).await).await;
        assert_eq!(json["tree"], serde_json::json!([{"id": "A", "label": "A"}]));
    }

    #[tokio::test]
    async fn test_reorder_rejects_malformed_body() {
        let body = serde_json::json!({"tree": "nope"});
        let response = post_json(app(), "/api/category-menu/reorder", &body).await;
        assert!(response.status().is_client_error());
    }
}
