//! Product sync endpoints.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use super::magento_site;
use crate::db::ProductMapRepository;
use crate::error::AppError;
use crate::services::SyncMode;
use crate::services::product_sync::{
    self, ProductListing, ProductSyncReport, ProductSyncRequest,
};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(index))
        .route("/api/products/sync", post(sync))
        .route("/api/products/resync", post(resync))
}

async fn index(State(state): State<AppState>) -> Result<Json<Vec<ProductListing>>, AppError> {
    let site = magento_site(&state).await?;
    let products = state.magento().products(&site).await?;
    let maps = ProductMapRepository::new(state.pool()).list_all().await?;
    Ok(Json(product_sync::listings(products, &maps)))
}

async fn run(
    state: &AppState,
    body: &ProductSyncRequest,
    mode: SyncMode,
) -> Result<Json<ProductSyncReport>, AppError> {
    product_sync::product_fields(body)?;
    let site = magento_site(state).await?;
    let report = product_sync::sync(state.pool(), state.shopify(), &site, body, mode).await?;
    Ok(Json(report))
}

async fn sync(
    State(state): State<AppState>,
    Json(body): Json<ProductSyncRequest>,
) -> Result<Json<ProductSyncReport>, AppError> {
    run(&state, &body, SyncMode::Sync).await
}

async fn resync(
    State(state): State<AppState>,
    Json(body): Json<ProductSyncRequest>,
) -> Result<Json<ProductSyncReport>, AppError> {
    run(&state, &body, SyncMode::Resync).await
}
