//! Attribute → metafield sync endpoints.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use super::magento_site;
use crate::db::AttributeMapRepository;
use crate::error::AppError;
use crate::services::SyncMode;
use crate::services::attribute_sync::{
    self, AttributeListing, AttributeSyncReport, AttributeSyncRequest,
};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/attributes", get(index))
        .route("/api/attributes/sync", post(sync))
        .route("/api/attributes/resync", post(resync))
}

async fn index(State(state): State<AppState>) -> Result<Json<Vec<AttributeListing>>, AppError> {
    let site = magento_site(&state).await?;
    let attributes = state.magento().attributes(&site).await?;
    let maps = AttributeMapRepository::new(state.pool()).list_all().await?;
    Ok(Json(attribute_sync::listings(attributes, maps)))
}

async fn run(
    state: &AppState,
    body: &AttributeSyncRequest,
    mode: SyncMode,
) -> Result<Json<AttributeSyncReport>, AppError> {
    attribute_sync::resolve(body)?;
    let site = magento_site(state).await?;
    let report = attribute_sync::sync(
        state.pool(),
        state.shopify(),
        state.magento(),
        &site,
        body,
        mode,
    )
    .await?;
    Ok(Json(report))
}

async fn sync(
    State(state): State<AppState>,
    Json(body): Json<AttributeSyncRequest>,
) -> Result<Json<AttributeSyncReport>, AppError> {
    run(&state, &body, SyncMode::Sync).await
}

async fn resync(
    State(state): State<AppState>,
    Json(body): Json<AttributeSyncRequest>,
) -> Result<Json<AttributeSyncReport>, AppError> {
    run(&state, &body, SyncMode::Resync).await
}
