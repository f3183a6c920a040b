//! Category → collection sync endpoints.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use super::magento_site;
use crate::db::{CategoryMap, CategoryMapRepository};
use crate::error::AppError;
use crate::services::category_sync::{self, CategoryListing, CategorySyncRequest};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/categories", get(index))
        .route("/api/categories/sync", post(sync))
        .route("/api/categories/resync", post(resync))
}

async fn index(State(state): State<AppState>) -> Result<Json<Vec<CategoryListing>>, AppError> {
    let site = magento_site(&state).await?;
    let categories = state.magento().categories(&site).await?;
    let maps = CategoryMapRepository::new(state.pool()).list_all().await?;
    Ok(Json(category_sync::listings(categories, &maps)))
}

async fn sync(
    State(state): State<AppState>,
    Json(body): Json<CategorySyncRequest>,
) -> Result<Json<CategoryMap>, AppError> {
    let site = magento_site(&state).await?;
    let map = category_sync::sync(state.pool(), state.shopify(), &site, &body).await?;
    Ok(Json(map))
}

async fn resync(
    State(state): State<AppState>,
    Json(body): Json<CategorySyncRequest>,
) -> Result<Json<CategoryMap>, AppError> {
    let site = magento_site(&state).await?;
    let map = category_sync::resync(state.pool(), state.shopify(), &site, &body).await?;
    Ok(Json(map))
}
