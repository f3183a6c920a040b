//! Magento connection settings endpoints.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::Serialize;

use crate::error::AppError;
use crate::services::{self, SettingsUpdate, SettingsView};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/settings", get(show).post(update))
        .route("/api/settings/push-mapping", post(push_mapping))
}

#[derive(Debug, Serialize)]
struct PushResult {
    pushed: usize,
}

/// Current settings. The token itself is never returned.
async fn show(State(state): State<AppState>) -> Result<Json<SettingsView>, AppError> {
    let settings = services::settings::load(state.pool(), state.settings()).await?;
    Ok(Json(settings.view()))
}

async fn update(
    State(state): State<AppState>,
    Json(body): Json<SettingsUpdate>,
) -> Result<Json<SettingsView>, AppError> {
    services::settings::save(state.pool(), state.settings(), &body).await?;
    let settings = services::settings::load(state.pool(), state.settings()).await?;
    Ok(Json(settings.view()))
}

/// Send the product mapping to the saved Magento push endpoint.
async fn push_mapping(State(state): State<AppState>) -> Result<Json<PushResult>, AppError> {
    let settings = services::settings::load(state.pool(), state.settings()).await?;
    let pushed =
        services::product_sync::push_mapping(state.pool(), state.magento(), &settings).await?;
    Ok(Json(PushResult { pushed }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support::{app, body_text, post_json};

    #[tokio::test]
    async fn test_blank_url_is_rejected_without_writing() {
        let body = serde_json::json!({"magentoUrl": "  ", "magentoToken": "abc"});
        let response = post_json(app(), "/api/settings", &body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Bad request: Magento URL is required");
    }
}
