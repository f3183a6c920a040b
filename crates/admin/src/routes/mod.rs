//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                                - Liveness
//! GET  /health/ready                          - Database check
//!
//! # Collection menu
//! GET  /api/category-menu?versionId=          - Working tree, versions, selected version
//! POST /api/category-menu                     - Save tree as the new active version
//! GET  /api/category-menu/versions            - Version summaries, newest first
//! POST /api/category-menu/reorder             - Apply a drag gesture to a tree
//! POST /api/category-menu/build-from-magento  - Seed a tree from Magento categories
//!
//! # Category sync
//! GET  /api/categories                        - Magento categories with sync state
//! POST /api/categories/sync                   - Create and publish a collection
//! POST /api/categories/resync                 - Update and re-publish a collection
//!
//! # Attribute sync
//! GET  /api/attributes                        - Magento attributes with mapping
//! POST /api/attributes/sync                   - Define metafield, sync options
//! POST /api/attributes/resync                 - Sync options, refresh mapping
//!
//! # Product sync
//! GET  /api/products                          - Magento products with sync state
//! POST /api/products/sync                     - Create, stock and publish a product
//! POST /api/products/resync                   - Update a product, replace its images
//!
//! # Settings
//! GET  /api/settings                          - Magento URL, endpoint, token presence
//! POST /api/settings                          - Save settings
//! POST /api/settings/push-mapping             - Send the product mapping to Magento
//! ```

pub mod attributes;
pub mod categories;
pub mod health;
pub mod menu;
pub mod products;
pub mod settings;

use axum::Router;

use crate::error::AppError;
use crate::magento::MagentoSite;
use crate::services;
use crate::state::AppState;

/// Build the complete router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(menu::router())
        .merge(categories::router())
        .merge(attributes::router())
        .merge(products::router())
        .merge(settings::router())
}

/// The Magento site from the current settings.
async fn magento_site(state: &AppState) -> Result<MagentoSite, AppError> {
    let settings = services::settings::load(state.pool(), state.settings()).await?;
    let site = settings
        .site()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok(site)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod test_support {
    use std::time::Duration;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Method, Request, Response, header};
    use http_body_util::BodyExt;
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use crate::config::{AdminConfig, MenuConfig, ShopifyAdminConfig};
    use crate::state::AppState;

    /// Router over a lazily connecting pool; handlers that never touch the
    /// database or an upstream can be exercised without either.
    pub fn app() -> Router {
        let config = AdminConfig {
            database_url: SecretString::from("postgres://localhost/magbridge_test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            shopify: ShopifyAdminConfig {
                store: "test.myshopify.com".to_string(),
                api_version: "2026-01".to_string(),
                access_token: SecretString::from("shpat_test"),
            },
            menu: MenuConfig::default(),
            settings_cache_ttl: Duration::from_secs(30),
            magento_timeout: Duration::from_secs(5),
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
            tls: None,
        };
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy("postgres://localhost/magbridge_test")
            .unwrap();
        let state = AppState::new(config, pool).unwrap();
        super::routes().with_state(state)
    }

    pub async fn get(app: Router, uri: &str) -> Response<Body> {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app.oneshot(request).await.unwrap()
    }

    pub async fn post_json(app: Router, uri: &str, body: &serde_json::Value) -> Response<Body> {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        app.oneshot(request).await.unwrap()
    }

    pub async fn body_text(response: Response<Body>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    pub async fn body_json(response: Response<Body>) -> serde_json::Value {
        serde_json::from_str(&body_text(response).await).unwrap()
    }
}
