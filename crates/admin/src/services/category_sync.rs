//! Push Magento categories to Shopify as collections.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::instrument;

use magbridge_core::lenient_id;

use super::ServiceError;
use crate::db::{CategoryMap, CategoryMapRepository};
use crate::magento::{MagentoCategory, MagentoSite};
use crate::shopify::{AdminClient, CollectionFields};

/// A Magento category with its sync state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListing {
    pub magento_category_id: i64,
    pub name: String,
    pub shopify_collection_id: Option<String>,
    pub is_synced: bool,
    pub image: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub description: Option<String>,
}

/// A sync or resync submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySyncRequest {
    #[serde(default, deserialize_with = "lenient_id")]
    pub magento_category_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    /// Collection to update on resync; defaults to the mapped one.
    #[serde(default)]
    pub shopify_collection_id: Option<String>,
}

/// Annotate categories with their mappings, keeping the category order.
#[must_use]
pub fn listings(categories: Vec<MagentoCategory>, maps: &[CategoryMap]) -> Vec<CategoryListing> {
    let by_category: HashMap<i64, &CategoryMap> =
        maps.iter().map(|m| (m.magento_category_id, m)).collect();

    categories
        .into_iter()
        .map(|c| {
            let map = by_category.get(&c.category_id);
            CategoryListing {
                magento_category_id: c.category_id,
                name: c.name,
                shopify_collection_id: map.map(|m| m.shopify_collection_id.clone()),
                is_synced: map.is_some(),
                image: c.image,
                meta_title: c.meta_title,
                meta_description: c.meta_description,
                description: c.description,
            }
        })
        .collect()
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Collection fields for a category.
///
/// # Errors
///
/// Returns `ServiceError::Invalid` without a category id or name.
pub fn collection_fields(
    request: &CategorySyncRequest,
    site: &MagentoSite,
) -> Result<CollectionFields, ServiceError> {
    let name = request.name.trim();
    if request.magento_category_id == 0 || name.is_empty() {
        return Err(ServiceError::Invalid("Missing required fields".to_string()));
    }

    let description = non_blank(request.description.as_ref());
    let meta_description = non_blank(request.meta_description.as_ref());

    Ok(CollectionFields {
        title: name.to_string(),
        description_html: description.or(meta_description).unwrap_or_default().to_string(),
        seo_title: non_blank(request.meta_title.as_ref())
            .unwrap_or(name)
            .to_string(),
        seo_description: meta_description.unwrap_or_default().to_string(),
        image_src: site.image_url(request.image.as_deref()),
    })
}

/// Create a collection for a category not yet synced, publish it and record
/// the mapping.
///
/// # Errors
///
/// Returns `ServiceError::Invalid` for incomplete input or a category that
/// is already mapped, or the first upstream/storage failure.
#[instrument(skip(pool, shopify, site, request), fields(category = request.magento_category_id))]
pub async fn sync(
    pool: &PgPool,
    shopify: &AdminClient,
    site: &MagentoSite,
    request: &CategorySyncRequest,
) -> Result<CategoryMap, ServiceError> {
    let fields = collection_fields(request, site)?;
    let repo = CategoryMapRepository::new(pool);

    if let Some(existing) = repo.get_by_category(request.magento_category_id).await? {
        return Err(ServiceError::Invalid(format!(
            "category {} is already synced to {}",
            existing.magento_category_id, existing.shopify_collection_id
        )));
    }

    let collection_id = shopify.create_collection(&fields).await?;
    shopify.publish_to_online_store(&collection_id).await?;

    let map = repo
        .upsert(request.magento_category_id, &collection_id, &fields.title)
        .await?;
    tracing::info!(collection_id = %map.shopify_collection_id, "Synced category");
    Ok(map)
}

/// Overwrite the mapped collection with the category's current fields,
/// re-publish it and refresh the mapping name.
///
/// # Errors
///
/// Returns `ServiceError::Invalid` for incomplete input or when no
/// collection id is known, or the first upstream/storage failure.
#[instrument(skip(pool, shopify, site, request), fields(category = request.magento_category_id))]
pub async fn resync(
    pool: &PgPool,
    shopify: &AdminClient,
    site: &MagentoSite,
    request: &CategorySyncRequest,
) -> Result<CategoryMap, ServiceError> {
    let fields = collection_fields(request, site)?;
    let repo = CategoryMapRepository::new(pool);

    let collection_id = match non_blank(request.shopify_collection_id.as_ref()) {
        Some(id) => id.to_string(),
        None => repo
            .get_by_category(request.magento_category_id)
            .await?
            .map(|m| m.shopify_collection_id)
            .ok_or_else(|| ServiceError::Invalid("Missing collectionId".to_string()))?,
    };

    shopify.update_collection(&collection_id, &fields).await?;
    shopify.publish_to_online_store(&collection_id).await?;

    let map = repo
        .upsert(request.magento_category_id, &collection_id, &fields.title)
        .await?;
    tracing::info!(collection_id = %map.shopify_collection_id, "Resynced category");
    Ok(map)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::Utc;
    use magbridge_core::CategoryMapId;

    use super::*;

    fn site() -> MagentoSite {
        MagentoSite::new("https://shop.example", None).unwrap()
    }

    fn request(json: serde_json::Value) -> CategorySyncRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_fields_prefer_description_then_meta() {
        let fields = collection_fields(
            &request(serde_json::json!({
                "magentoCategoryId": "12",
                "name": "Ovens",
                "metaTitle": "",
                "metaDescription": "Hot ovens",
                "description": " ",
                "image": "/media/catalog/category/ovens.jpg"
            })),
            &site(),
        )
        .unwrap();

        assert_eq!(
            fields,
            CollectionFields {
                title: "Ovens".into(),
                description_html: "Hot ovens".into(),
                seo_title: "Ovens".into(),
                seo_description: "Hot ovens".into(),
                image_src: Some("https://shop.example/media/catalog/category/ovens.jpg".into()),
            }
        );
    }

    #[test]
    fn test_fields_with_everything_set() {
        let fields = collection_fields(
            &request(serde_json::json!({
                "magentoCategoryId": 12,
                "name": "Ovens",
                "metaTitle": "Buy ovens",
                "metaDescription": "Hot ovens",
                "description": "<p>All our ovens</p>"
            })),
            &site(),
        )
        .unwrap();

        assert_eq!(fields.description_html, "<p>All our ovens</p>");
        assert_eq!(fields.seo_title, "Buy ovens");
        assert_eq!(fields.image_src, None);
    }

    #[test]
    fn test_fields_require_id_and_name() {
        let missing_name = collection_fields(
            &request(serde_json::json!({"magentoCategoryId": 12, "name": "  "})),
            &site(),
        );
        assert!(matches!(missing_name, Err(ServiceError::Invalid(_))));

        let missing_id = collection_fields(&request(serde_json::json!({"name": "Ovens"})), &site());
        assert!(matches!(missing_id, Err(ServiceError::Invalid(_))));
    }

    #[test]
    fn test_listings_mark_synced_categories() {
        let categories: Vec<MagentoCategory> = serde_json::from_value(serde_json::json!([
            {"category_id": 10, "parent_id": 2, "name": "Kitchen"},
            {"category_id": 11, "parent_id": 10, "name": "Ovens", "image": "ovens.jpg"}
        ]))
        .unwrap();
        let maps = vec![CategoryMap {
            id: CategoryMapId::new(1),
            magento_category_id: 11,
            shopify_collection_id: "gid://shopify/Collection/5".into(),
            name: "Ovens".into(),
            updated_at: Utc::now(),
        }];

        let rows = listings(categories, &maps);
        assert!(!rows[0].is_synced);
        assert_eq!(rows[0].shopify_collection_id, None);
        assert!(rows[1].is_synced);
        assert_eq!(
            rows[1].shopify_collection_id.as_deref(),
            Some("gid://shopify/Collection/5")
        );

        let json = serde_json::to_value(&rows[1]).unwrap();
        assert_eq!(json["isSynced"], true);
        assert_eq!(json["magentoCategoryId"], 11);
    }
}
