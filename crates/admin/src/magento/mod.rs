//! Magento REST client.
//!
//! Reads the category and product-attribute exports of the Magento
//! `shopify` module. The site (base URL and optional bearer token) comes
//! from the settings table and can change between calls, so it is passed
//! per request rather than held by the client.
//!
//! # Endpoints
//!
//! - `GET {base}/rest/V1/shopify/categories` → `{ "items": [...] }`
//! - `GET {base}/rest/V1/shopify/product_attr` → array whose element 2 holds
//!   the attribute list
//! - `GET {base}/rest/V1/shopify/products` → `{ "items": [...] }`
//! - `POST {push_endpoint}` ← `{ "status": "success", "total": n, "items": [...] }`

mod types;

pub use types::*;
pub(crate) use types::{optional_quantity, optional_scalar};

use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;
use url::Url;

/// Category export path.
pub const CATEGORIES_PATH: &str = "/rest/V1/shopify/categories";

/// Product attribute export path.
pub const ATTRIBUTES_PATH: &str = "/rest/V1/shopify/product_attr";

/// Product export path.
pub const PRODUCTS_PATH: &str = "/rest/V1/shopify/products";

/// Mapping rows sent per push request.
pub const PUSH_BATCH_SIZE: usize = 200;

/// Index of the attribute list inside the attribute export array.
const ATTRIBUTES_ELEMENT: usize = 2;

/// Errors that can occur when talking to Magento.
#[derive(Debug, Error)]
pub enum MagentoError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Magento answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Rate limited by Magento.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Token rejected.
    #[error("Unauthorized: Magento rejected the access token")]
    Unauthorized,

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// No Magento URL has been saved yet.
    #[error("Magento URL is not configured")]
    NotConfigured,

    /// The saved Magento URL is not a valid absolute URL.
    #[error("Invalid Magento URL {0:?}")]
    InvalidUrl(String),
}

/// Where and how to reach one Magento installation.
#[derive(Clone)]
pub struct MagentoSite {
    base_url: Url,
    token: Option<SecretString>,
}

impl MagentoSite {
    /// Build a site from the stored `magento_url` and `magento_token`.
    ///
    /// # Errors
    ///
    /// Returns `NotConfigured` for a blank URL and `InvalidUrl` when it does
    /// not parse.
    pub fn new(base_url: &str, token: Option<SecretString>) -> Result<Self, MagentoError> {
        let trimmed = base_url.trim();
        if trimmed.is_empty() {
            return Err(MagentoError::NotConfigured);
        }
        let base_url =
            Url::parse(trimmed).map_err(|_| MagentoError::InvalidUrl(trimmed.to_string()))?;
        let token = token.filter(|t| !t.expose_secret().trim().is_empty());
        Ok(Self { base_url, token })
    }

    /// The configured base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join an absolute path onto the base URL, keeping any path prefix the
    /// base already has (Magento often lives under a sub-directory).
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Absolute `http(s)` URLs are kept; anything else is joined to the base.
    #[must_use]
    pub fn resolve(&self, path: &str) -> String {
        let path = path.trim();
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        self.endpoint(path)
    }

    /// Resolve an image reference to an absolute URL. Blank references
    /// resolve to `None`.
    #[must_use]
    pub fn image_url(&self, image: Option<&str>) -> Option<String> {
        let image = image.map(str::trim).filter(|s| !s.is_empty())?;
        Some(self.resolve(image))
    }
}

impl std::fmt::Debug for MagentoSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MagentoSite")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Magento REST client.
#[derive(Clone)]
pub struct MagentoClient {
    inner: Arc<MagentoClientInner>,
}

struct MagentoClientInner {
    client: reqwest::Client,
}

impl MagentoClient {
    /// Create a client whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(timeout: Duration) -> Result<Self, MagentoError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            inner: Arc::new(MagentoClientInner { client }),
        })
    }

    /// All categories of the Magento catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload does not parse.
    #[instrument(skip(self), fields(base_url = %site.base_url()))]
    pub async fn categories(
        &self,
        site: &MagentoSite,
    ) -> Result<Vec<MagentoCategory>, MagentoError> {
        let response: CategoryExport = self.get(site, CATEGORIES_PATH).await?;
        tracing::debug!(count = response.items.len(), "Fetched Magento categories");
        Ok(response.items)
    }

    /// All exported product attributes.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload does not parse.
    #[instrument(skip(self), fields(base_url = %site.base_url()))]
    pub async fn attributes(
        &self,
        site: &MagentoSite,
    ) -> Result<Vec<MagentoAttribute>, MagentoError> {
        let response: serde_json::Value = self.get(site, ATTRIBUTES_PATH).await?;
        parse_attribute_export(response)
    }

    /// One exported attribute by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload does not parse.
    pub async fn attribute(
        &self,
        site: &MagentoSite,
        code: &str,
    ) -> Result<Option<MagentoAttribute>, MagentoError> {
        Ok(self
            .attributes(site)
            .await?
            .into_iter()
            .find(|a| a.attribute_code == code))
    }

    /// All simple products of the Magento catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload does not parse.
    #[instrument(skip(self), fields(base_url = %site.base_url()))]
    pub async fn products(&self, site: &MagentoSite) -> Result<Vec<MagentoProduct>, MagentoError> {
        let response: ProductExport = self.get(site, PRODUCTS_PATH).await?;
        tracing::debug!(count = response.items.len(), "Fetched Magento products");
        Ok(response.items)
    }

    /// Post the product mapping to `url` in batches of [`PUSH_BATCH_SIZE`].
    ///
    /// Returns the number of rows Magento accepted. A failed batch stops the
    /// push; earlier batches stay delivered.
    ///
    /// # Errors
    ///
    /// Returns an error if a batch request fails or Magento rejects it.
    #[instrument(skip(self, entries), fields(url = %url, rows = entries.len()))]
    pub async fn push_product_map(
        &self,
        site: &MagentoSite,
        url: &str,
        entries: &[ProductMapEntry],
    ) -> Result<usize, MagentoError> {
        let mut pushed = 0;
        for batch in entries.chunks(PUSH_BATCH_SIZE) {
            let body = ProductMapPush {
                status: "success",
                total: batch.len(),
                items: batch,
            };
            let mut request = self.inner.client.post(url).json(&body);
            if let Some(token) = &site.token {
                request = request.bearer_auth(token.expose_secret());
            }
            let response = request.send().await?;
            if !response.status().is_success() {
                return Err(Self::parse_error(response).await);
            }
            pushed += batch.len();
            tracing::debug!(pushed, "Pushed product map batch");
        }
        Ok(pushed)
    }

    /// Execute a GET request against the site.
    async fn get<T: DeserializeOwned>(
        &self,
        site: &MagentoSite,
        path: &str,
    ) -> Result<T, MagentoError> {
        let mut request = self.inner.client.get(site.endpoint(path));
        if let Some(token) = &site.token {
            request = request.bearer_auth(token.expose_secret());
        }
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle API response and parse JSON.
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, MagentoError> {
        if response.status().is_success() {
            return response
                .json()
                .await
                .map_err(|e| MagentoError::Parse(format!("Failed to parse response: {e}")));
        }

        Err(Self::parse_error(response).await)
    }

    /// Parse error response from Magento.
    async fn parse_error(response: reqwest::Response) -> MagentoError {
        let status = response.status().as_u16();

        if status == 429 {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return MagentoError::RateLimited(retry_after);
        }

        if status == 401 || status == 403 {
            return MagentoError::Unauthorized;
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        MagentoError::Api { status, message }
    }
}

impl std::fmt::Debug for MagentoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MagentoClient").finish_non_exhaustive()
    }
}

/// Pull the attribute list out of the export array. A payload that is not
/// an array, or has no list at the expected position, holds no attributes.
fn parse_attribute_export(
    response: serde_json::Value,
) -> Result<Vec<MagentoAttribute>, MagentoError> {
    let serde_json::Value::Array(mut elements) = response else {
        return Ok(Vec::new());
    };
    if elements.len() <= ATTRIBUTES_ELEMENT {
        return Ok(Vec::new());
    }
    match elements.swap_remove(ATTRIBUTES_ELEMENT) {
        list @ serde_json::Value::Array(_) => serde_json::from_value(list)
            .map_err(|e| MagentoError::Parse(format!("Invalid attribute list: {e}"))),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn site(url: &str) -> MagentoSite {
        MagentoSite::new(url, None).unwrap()
    }

    #[test]
    fn test_site_requires_url() {
        assert!(matches!(
            MagentoSite::new("  ", None),
            Err(MagentoError::NotConfigured)
        ));
        assert!(matches!(
            MagentoSite::new("not a url", None),
            Err(MagentoError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_blank_token_is_dropped() {
        let site = MagentoSite::new("https://shop.example", Some(SecretString::from(" "))).unwrap();
        assert!(site.token.is_none());
        assert!(format!("{site:?}").contains("token: None"));
    }

    #[test]
    fn test_token_is_redacted_in_debug() {
        let site =
            MagentoSite::new("https://shop.example", Some(SecretString::from("s3cret"))).unwrap();
        let debug = format!("{site:?}");
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        assert_eq!(
            site("https://shop.example/").endpoint(CATEGORIES_PATH),
            "https://shop.example/rest/V1/shopify/categories"
        );
        assert_eq!(
            site("https://shop.example/store").endpoint(ATTRIBUTES_PATH),
            "https://shop.example/store/rest/V1/shopify/product_attr"
        );
    }

    #[test]
    fn test_image_url_resolution() {
        let site = site("https://shop.example");
        assert_eq!(
            site.image_url(Some("/media/catalog/category/ovens.jpg")).as_deref(),
            Some("https://shop.example/media/catalog/category/ovens.jpg")
        );
        assert_eq!(
            site.image_url(Some("https://cdn.example/x.png")).as_deref(),
            Some("https://cdn.example/x.png")
        );
        assert_eq!(site.image_url(Some("  ")), None);
        assert_eq!(site.image_url(None), None);
    }

    #[test]
    fn test_resolve_push_endpoint() {
        let site = site("https://shop.example/store/");
        assert_eq!(
            site.resolve(crate::services::settings::DEFAULT_PUSH_ENDPOINT),
            "https://shop.example/store/rest/V1/shopify/product-map"
        );
        assert_eq!(
            site.resolve(" https://hooks.example/map "),
            "https://hooks.example/map"
        );
    }

    #[test]
    fn test_push_body_shape() {
        let entries = vec![ProductMapEntry {
            magento_product_id: 501,
            shopify_product_id: "gid://shopify/Product/9".to_string(),
            sku: None,
            name: "Combi steamer".to_string(),
            updated_at: chrono::DateTime::<chrono::Utc>::UNIX_EPOCH,
        }];
        let body = serde_json::to_value(ProductMapPush {
            status: "success",
            total: entries.len(),
            items: &entries,
        })
        .unwrap();
        assert_eq!(body["status"], "success");
        assert_eq!(body["total"], 1);
        assert_eq!(body["items"][0]["magento_product_id"], 501);
        assert_eq!(body["items"][0]["sku"], serde_json::Value::Null);
        assert_eq!(body["items"][0]["updated_at"], "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_attribute_export_takes_third_element() {
        let payload = serde_json::json!([
            "success",
            3,
            [
                {
                    "attribute_code": "color",
                    "frontend_label": "Color",
                    "frontend_input": "select",
                    "values": [{"label": "Red", "value": 12}, {"label": "Blue", "value": "13"}]
                },
                {"attribute_code": "width", "frontend_input": "text"}
            ]
        ]);
        let attrs = parse_attribute_export(payload).unwrap();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[0].attribute_code, "color");
        assert_eq!(attrs[0].values[0].value, "12");
        assert_eq!(attrs[0].values[1].value, "13");
        assert_eq!(attrs[1].frontend_label, None);
        assert!(attrs[1].values.is_empty());
    }

    #[test]
    fn test_attribute_export_without_list_is_empty() {
        assert!(parse_attribute_export(serde_json::json!({"items": []})).unwrap().is_empty());
        assert!(parse_attribute_export(serde_json::json!(["success", 0])).unwrap().is_empty());
        assert!(
            parse_attribute_export(serde_json::json!(["success", 0, null]))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_malformed_attribute_list_is_a_parse_error() {
        let err = parse_attribute_export(serde_json::json!(["success", 1, [{"values": []}]]))
            .unwrap_err();
        assert!(matches!(err, MagentoError::Parse(_)));
    }
}
