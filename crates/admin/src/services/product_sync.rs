//! Push Magento products to Shopify and report the mapping back to Magento.
//!
//! A sync writes one simple product end to end: base fields, default variant
//! price, SKU, on-hand stock at the first location, images, Online Store
//! publication, and finally the mapping row. The mapping is what later
//! resyncs update and what [`push_mapping`] sends to Magento.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::instrument;

use magbridge_core::lenient_id;

use super::{MagentoSettings, ServiceError, SyncMode};
use crate::db::{ProductMap, ProductMapRepository};
use crate::magento::{
    MagentoClient, MagentoProduct, MagentoSite, ProductMapEntry, optional_quantity,
    optional_scalar,
};
use crate::shopify::{AdminClient, ProductFields};

/// Price written when a product has none.
const DEFAULT_PRICE: &str = "0";

/// A Magento product with its sync state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListing {
    pub magento_product_id: i64,
    pub name: String,
    pub sku: Option<String>,
    pub price: Option<String>,
    pub qty: i64,
    pub weight: Option<String>,
    pub shopify_product_id: Option<String>,
    pub is_synced: bool,
    pub description: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub image_url: Option<String>,
    pub gallery_json: Option<String>,
}

/// A sync or resync submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSyncRequest {
    #[serde(default, deserialize_with = "lenient_id")]
    pub magento_product_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "optional_quantity")]
    pub qty: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub gallery_json: Option<String>,
}

/// Outcome of a product sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSyncReport {
    #[serde(flatten)]
    pub mapping: ProductMap,
    /// Whether a new Shopify product was created.
    pub created: bool,
}

/// Annotate products with their mappings, keeping the export order.
#[must_use]
pub fn listings(products: Vec<MagentoProduct>, maps: &[ProductMap]) -> Vec<ProductListing> {
    let by_product: HashMap<i64, &ProductMap> =
        maps.iter().map(|m| (m.magento_product_id, m)).collect();

    products
        .into_iter()
        .map(|p| {
            let map = by_product.get(&p.product_id);
            ProductListing {
                magento_product_id: p.product_id,
                price: p.effective_price().map(str::to_string),
                qty: p.effective_qty(),
                shopify_product_id: map.map(|m| m.shopify_product_id.clone()),
                is_synced: map.is_some(),
                name: p.name,
                sku: p.sku,
                weight: p.weight,
                description: p.description,
                meta_title: p.meta_title,
                meta_description: p.meta_description,
                image_url: p.image_url,
                gallery_json: p.gallery_json,
            }
        })
        .collect()
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Product fields for a submission.
///
/// # Errors
///
/// Returns `ServiceError::Invalid` without a product id or name.
pub fn product_fields(request: &ProductSyncRequest) -> Result<ProductFields, ServiceError> {
    let name = request.name.trim();
    if request.magento_product_id == 0 || name.is_empty() {
        return Err(ServiceError::Invalid("Missing required fields".to_string()));
    }

    Ok(ProductFields {
        title: name.to_string(),
        description_html: request
            .description
            .as_deref()
            .map(decode_entities)
            .unwrap_or_default(),
        seo_title: non_blank(request.meta_title.as_ref())
            .unwrap_or(name)
            .to_string(),
        seo_description: non_blank(request.meta_description.as_ref())
            .unwrap_or_default()
            .to_string(),
    })
}

/// Image URLs to attach: the main image first, then gallery entries that
/// are not repeats. A gallery that is not a JSON array contributes nothing.
#[must_use]
pub fn image_urls(request: &ProductSyncRequest, site: &MagentoSite) -> Vec<String> {
    let gallery: Vec<serde_json::Value> = request
        .gallery_json
        .as_deref()
        .and_then(|json| serde_json::from_str(json).ok())
        .unwrap_or_default();

    let main = site.image_url(request.image_url.as_deref());
    let mut seen = HashSet::new();
    main.into_iter()
        .chain(
            gallery
                .iter()
                .filter_map(serde_json::Value::as_str)
                .filter_map(|url| site.image_url(Some(url))),
        )
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

/// Magento exports descriptions HTML-escaped. Named entities Magento emits
/// and numeric references are decoded; anything else is left as written.
fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some((head, tail)) = rest.split_once('&') {
        out.push_str(head);
        let decoded = tail
            .split_once(';')
            .filter(|(name, _)| name.len() < 10)
            .and_then(|(name, after)| entity(name).map(|c| (c, after)));
        match decoded {
            Some((c, after)) => {
                out.push(c);
                rest = after;
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

fn entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}

/// Push one product to Shopify and record the mapping.
///
/// `Sync` creates a product for an unmapped Magento product. `Resync`
/// updates the mapped one and replaces its images.
///
/// # Errors
///
/// Returns `ServiceError::Invalid` for incomplete input, a sync of a mapped
/// product, or a resync of an unmapped one; otherwise the first
/// upstream/storage failure. Steps already applied in Shopify stay applied.
#[instrument(
    skip(pool, shopify, site, request),
    fields(product = request.magento_product_id, mode = ?mode)
)]
pub async fn sync(
    pool: &PgPool,
    shopify: &AdminClient,
    site: &MagentoSite,
    request: &ProductSyncRequest,
    mode: SyncMode,
) -> Result<ProductSyncReport, ServiceError> {
    let fields = product_fields(request)?;
    let repo = ProductMapRepository::new(pool);
    let existing = repo.get_by_product(request.magento_product_id).await?;

    let handle = match (mode, existing) {
        (SyncMode::Sync, Some(map)) => {
            return Err(ServiceError::Invalid(format!(
                "product {} is already synced to {}",
                map.magento_product_id, map.shopify_product_id
            )));
        }
        (SyncMode::Resync, None) => {
            return Err(ServiceError::Invalid(
                "This product is not synced yet".to_string(),
            ));
        }
        (SyncMode::Sync, None) => shopify.create_product(&fields).await?,
        (SyncMode::Resync, Some(map)) => {
            shopify
                .update_product(&map.shopify_product_id, &fields)
                .await?
        }
    };

    let price = non_blank(request.price.as_ref()).unwrap_or(DEFAULT_PRICE);
    shopify
        .set_variant_price(&handle.product_id, &handle.variant_id, price)
        .await?;

    let sku = non_blank(request.sku.as_ref());
    if let Some(sku) = sku {
        shopify
            .set_inventory_sku(&handle.inventory_item_id, sku)
            .await?;
    }

    let location_id = shopify.first_location_id().await?;
    shopify
        .activate_inventory(&handle.inventory_item_id, &location_id)
        .await?;
    shopify
        .set_on_hand(
            &handle.inventory_item_id,
            &location_id,
            request.qty.unwrap_or(0),
        )
        .await?;

    let urls = image_urls(request, site);
    if !urls.is_empty() {
        if mode == SyncMode::Resync {
            let old = shopify.product_image_ids(&handle.product_id).await?;
            shopify.delete_product_media(&handle.product_id, old).await?;
        }
        shopify
            .create_product_images(&handle.product_id, &urls)
            .await?;
    }

    shopify.publish_to_online_store(&handle.product_id).await?;

    let mapping = repo
        .upsert(
            request.magento_product_id,
            &handle.product_id,
            sku,
            &fields.title,
        )
        .await?;
    let created = mode == SyncMode::Sync;
    tracing::info!(product_id = %mapping.shopify_product_id, created, "Synced product");
    Ok(ProductSyncReport { mapping, created })
}

/// Rows sent to Magento, in mapping order.
#[must_use]
pub fn push_entries(maps: Vec<ProductMap>) -> Vec<ProductMapEntry> {
    maps.into_iter()
        .map(|m| ProductMapEntry {
            magento_product_id: m.magento_product_id,
            shopify_product_id: m.shopify_product_id,
            sku: m.sku,
            name: m.name,
            updated_at: m.updated_at,
        })
        .collect()
}

/// Send every product mapping to the configured Magento push endpoint.
///
/// Returns the number of rows pushed; no rows means no request.
///
/// # Errors
///
/// Returns `ServiceError::Magento` when Magento is not configured or
/// rejects a batch, and `ServiceError::Repository` if the read fails.
#[instrument(skip(pool, magento, settings))]
pub async fn push_mapping(
    pool: &PgPool,
    magento: &MagentoClient,
    settings: &MagentoSettings,
) -> Result<usize, ServiceError> {
    let site = settings.site()?;
    let entries = push_entries(ProductMapRepository::new(pool).list_all().await?);
    if entries.is_empty() {
        tracing::info!("No product mappings to push");
        return Ok(0);
    }

    let url = site.resolve(&settings.push_endpoint);
    let pushed = magento.push_product_map(&site, &url, &entries).await?;
    tracing::info!(pushed, url = %url, "Pushed product mapping to Magento");
    Ok(pushed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::Utc;
    use magbridge_core::ProductMapId;

    use super::*;

    fn site() -> MagentoSite {
        MagentoSite::new("https://shop.example", None).unwrap()
    }

    fn request(json: serde_json::Value) -> ProductSyncRequest {
        serde_json::from_value(json).unwrap()
    }

    fn mapping(magento_product_id: i64, shopify: &str) -> ProductMap {
        ProductMap {
            id: ProductMapId::new(1),
            magento_product_id,
            shopify_product_id: shopify.into(),
            sku: Some("CS-10".into()),
            name: "Combi steamer".into(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_fields_fall_back_to_name_and_decode_description() {
        let fields = product_fields(&request(serde_json::json!({
            "magentoProductId": "501",
            "name": " Combi steamer ",
            "metaTitle": "  ",
            "description": "&lt;p&gt;10 trays &amp; 2 racks&lt;/p&gt;"
        })))
        .unwrap();

        assert_eq!(
            fields,
            ProductFields {
                title: "Combi steamer".into(),
                description_html: "<p>10 trays & 2 racks</p>".into(),
                seo_title: "Combi steamer".into(),
                seo_description: String::new(),
            }
        );
    }

    #[test]
    fn test_fields_require_id_and_name() {
        let missing_id = product_fields(&request(serde_json::json!({"name": "Tray"})));
        assert!(matches!(missing_id, Err(ServiceError::Invalid(m)) if m == "Missing required fields"));

        let missing_name = product_fields(&request(serde_json::json!({"magentoProductId": 7})));
        assert!(matches!(missing_name, Err(ServiceError::Invalid(_))));
    }

    #[test]
    fn test_request_accepts_numeric_price_and_qty() {
        let req = request(serde_json::json!({
            "magentoProductId": 501, "name": "Tray", "price": 9.5, "qty": "3"
        }));
        assert_eq!(req.price.as_deref(), Some("9.5"));
        assert_eq!(req.qty, Some(3));
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("Caf&eacute; &#233; &#x41;"), "Caf&eacute; é A");
        assert_eq!(decode_entities("a & b"), "a & b");
        assert_eq!(decode_entities("&quot;hot&quot;&nbsp;"), "\"hot\"\u{a0}");
        assert_eq!(decode_entities("trailing &amp"), "trailing &amp");
    }

    #[test]
    fn test_image_urls_main_first_without_repeats() {
        let req = request(serde_json::json!({
            "magentoProductId": 501,
            "name": "Combi steamer",
            "imageUrl": "https://shop.example/media/cs.jpg",
            "galleryJson": r#"["https://shop.example/media/cs.jpg", " /media/cs-2.jpg ", "", 4,
                "/media/cs-2.jpg"]"#
        }));
        assert_eq!(
            image_urls(&req, &site()),
            vec![
                "https://shop.example/media/cs.jpg".to_string(),
                "https://shop.example/media/cs-2.jpg".to_string(),
            ]
        );
    }

    #[test]
    fn test_invalid_gallery_is_ignored() {
        let req = request(serde_json::json!({
            "magentoProductId": 501, "name": "Tray", "galleryJson": "not json"
        }));
        assert!(image_urls(&req, &site()).is_empty());

        let req = request(serde_json::json!({
            "magentoProductId": 501, "name": "Tray", "galleryJson": r#"{"a": 1}"#
        }));
        assert!(image_urls(&req, &site()).is_empty());
    }

    #[test]
    fn test_listings_mark_synced_products() {
        let products: Vec<MagentoProduct> = serde_json::from_value(serde_json::json!([
            {"product_id": 500, "name": "Tray", "price": "12", "special_price": "9.50"},
            {"product_id": "501", "name": "Combi steamer", "qty": 4, "salable_qty": null}
        ]))
        .unwrap();
        let maps = vec![mapping(501, "gid://shopify/Product/9")];

        let rows = listings(products, &maps);
        assert!(!rows[0].is_synced);
        assert_eq!(rows[0].price.as_deref(), Some("9.50"));
        assert_eq!(rows[0].qty, 0);
        assert!(rows[1].is_synced);
        assert_eq!(rows[1].qty, 4);

        let json = serde_json::to_value(&rows[1]).unwrap();
        assert_eq!(json["shopifyProductId"], "gid://shopify/Product/9");
        assert_eq!(json["magentoProductId"], 501);
    }

    #[test]
    fn test_push_entries_keep_mapping_fields() {
        let entries = push_entries(vec![mapping(501, "gid://shopify/Product/9")]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].magento_product_id, 501);
        assert_eq!(entries[0].shopify_product_id, "gid://shopify/Product/9");
        assert_eq!(entries[0].sku.as_deref(), Some("CS-10"));
    }

    #[test]
    fn test_report_flattens_mapping() {
        let report = ProductSyncReport {
            mapping: mapping(501, "gid://shopify/Product/9"),
            created: true,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["magentoProductId"], 501);
        assert_eq!(json["created"], true);
    }
}
