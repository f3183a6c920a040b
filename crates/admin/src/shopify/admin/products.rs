//! Product, variant, inventory and media calls used by product sync.

use tracing::instrument;

use super::{AdminClient, check_user_errors, missing, queries};
use crate::shopify::{AdminShopifyError, ON_HAND_REASON, ProductFields, ProductHandle};

/// Locations fetched when picking the stock location.
const LOCATION_PAGE: i64 = 5;

impl AdminClient {
    /// Create a product and return the ids of it and its default variant.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails, returns user errors, or the
    /// product comes back without a variant.
    #[instrument(skip(self, fields), fields(title = %fields.title))]
    pub async fn create_product(
        &self,
        fields: &ProductFields,
    ) -> Result<ProductHandle, AdminShopifyError> {
        let variables = queries::product_create::Variables {
            product: product_input(None, fields),
        };

        let response = self.execute::<queries::ProductCreate>(variables).await?;
        let payload = response
            .product_create
            .ok_or_else(|| missing("productCreate payload"))?;
        check_user_errors(&payload.user_errors)?;

        product_handle(payload.product, "productCreate")
    }

    /// Overwrite an existing product's title, description and SEO.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails, returns user errors, or the
    /// product comes back without a variant.
    #[instrument(skip(self, fields), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: &str,
        fields: &ProductFields,
    ) -> Result<ProductHandle, AdminShopifyError> {
        let variables = queries::product_update::Variables {
            product: product_input(Some(id.to_string()), fields),
        };

        let response = self.execute::<queries::ProductUpdate>(variables).await?;
        let payload = response
            .product_update
            .ok_or_else(|| missing("productUpdate payload"))?;
        check_user_errors(&payload.user_errors)?;

        product_handle(payload.product, "productUpdate")
    }

    /// Set the price of one variant.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns user errors.
    #[instrument(skip(self))]
    pub async fn set_variant_price(
        &self,
        product_id: &str,
        variant_id: &str,
        price: &str,
    ) -> Result<(), AdminShopifyError> {
        let variables = queries::product_variants_bulk_update::Variables {
            product_id: product_id.to_string(),
            variants: vec![queries::product_variants_bulk_update::VariantPriceInput {
                id: variant_id.to_string(),
                price: price.to_string(),
            }],
        };

        let response = self
            .execute::<queries::ProductVariantsBulkUpdate>(variables)
            .await?;
        if let Some(payload) = response.product_variants_bulk_update {
            check_user_errors(&payload.user_errors)?;
        }
        Ok(())
    }

    /// Set the SKU on an inventory item.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns user errors.
    #[instrument(skip(self))]
    pub async fn set_inventory_sku(
        &self,
        inventory_item_id: &str,
        sku: &str,
    ) -> Result<(), AdminShopifyError> {
        let variables = queries::inventory_item_update::Variables {
            id: inventory_item_id.to_string(),
            input: queries::inventory_item_update::InventoryItemInput {
                sku: sku.to_string(),
            },
        };

        let response = self.execute::<queries::InventoryItemUpdate>(variables).await?;
        if let Some(payload) = response.inventory_item_update {
            check_user_errors(&payload.user_errors)?;
        }
        Ok(())
    }

    /// The store's first location, where pushed stock is kept.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the store has no location.
    #[instrument(skip(self))]
    pub async fn first_location_id(&self) -> Result<String, AdminShopifyError> {
        let variables = queries::get_locations::Variables {
            first: LOCATION_PAGE,
        };
        let response = self.execute::<queries::GetLocations>(variables).await?;

        response
            .locations
            .nodes
            .into_iter()
            .next()
            .map(|l| l.id)
            .ok_or_else(|| AdminShopifyError::NotFound("location".to_string()))
    }

    /// Start tracking an inventory item at a location.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns user errors.
    #[instrument(skip(self))]
    pub async fn activate_inventory(
        &self,
        inventory_item_id: &str,
        location_id: &str,
    ) -> Result<(), AdminShopifyError> {
        let variables = queries::inventory_activate::Variables {
            inventory_item_id: inventory_item_id.to_string(),
            location_id: location_id.to_string(),
        };

        let response = self.execute::<queries::InventoryActivate>(variables).await?;
        if let Some(payload) = response.inventory_activate {
            check_user_errors(&payload.user_errors)?;
        }
        Ok(())
    }

    /// Overwrite the on-hand quantity of an activated inventory item.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns user errors.
    #[instrument(skip(self))]
    pub async fn set_on_hand(
        &self,
        inventory_item_id: &str,
        location_id: &str,
        quantity: i64,
    ) -> Result<(), AdminShopifyError> {
        use queries::inventory_set_on_hand_quantities::{Input, SetQuantity, Variables};

        let variables = Variables {
            input: Input {
                reason: ON_HAND_REASON,
                set_quantities: vec![SetQuantity {
                    inventory_item_id: inventory_item_id.to_string(),
                    location_id: location_id.to_string(),
                    quantity,
                }],
            },
        };

        let response = self
            .execute::<queries::InventorySetOnHandQuantities>(variables)
            .await?;
        if let Some(payload) = response.inventory_set_on_hand_quantities {
            check_user_errors(&payload.user_errors)?;
        }
        Ok(())
    }

    /// Ids of the product's image media. Other media kinds are left out.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn product_image_ids(&self, product_id: &str) -> Result<Vec<String>, AdminShopifyError> {
        let variables = queries::get_product_media::Variables {
            id: product_id.to_string(),
        };
        let response = self.execute::<queries::GetProductMedia>(variables).await?;

        Ok(response
            .product
            .map(|p| image_ids(p.media.nodes))
            .unwrap_or_default())
    }

    /// Delete media from a product. An empty list makes no request.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns user errors.
    #[instrument(skip(self, media_ids), fields(count = media_ids.len()))]
    pub async fn delete_product_media(
        &self,
        product_id: &str,
        media_ids: Vec<String>,
    ) -> Result<(), AdminShopifyError> {
        if media_ids.is_empty() {
            return Ok(());
        }
        let variables = queries::product_delete_media::Variables {
            product_id: product_id.to_string(),
            media_ids,
        };

        let response = self.execute::<queries::ProductDeleteMedia>(variables).await?;
        if let Some(payload) = response.product_delete_media {
            check_user_errors(&payload.user_errors)?;
            tracing::debug!(
                deleted = payload.deleted_media_ids.map_or(0, |ids| ids.len()),
                "Deleted product media"
            );
        }
        Ok(())
    }

    /// Attach images to a product from their public URLs.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns user errors.
    #[instrument(skip(self, urls), fields(count = urls.len()))]
    pub async fn create_product_images(
        &self,
        product_id: &str,
        urls: &[String],
    ) -> Result<(), AdminShopifyError> {
        if urls.is_empty() {
            return Ok(());
        }
        let variables = queries::product_create_media::Variables {
            product_id: product_id.to_string(),
            media: urls
                .iter()
                .map(|url| queries::product_create_media::CreateMediaInput {
                    media_content_type: "IMAGE",
                    original_source: url.clone(),
                })
                .collect(),
        };

        let response = self.execute::<queries::ProductCreateMedia>(variables).await?;
        if let Some(payload) = response.product_create_media {
            check_user_errors(&payload.user_errors)?;
        }
        Ok(())
    }
}

fn product_input(id: Option<String>, fields: &ProductFields) -> queries::ProductInput {
    queries::ProductInput {
        id,
        title: fields.title.clone(),
        description_html: fields.description_html.clone(),
        seo: queries::SeoInput {
            title: fields.seo_title.clone(),
            description: fields.seo_description.clone(),
        },
    }
}

/// Pull product, default variant and inventory item ids out of a payload.
fn product_handle(
    product: Option<queries::ProductNode>,
    mutation: &str,
) -> Result<ProductHandle, AdminShopifyError> {
    let product = product.ok_or_else(|| missing(&format!("product from {mutation}")))?;
    let variant = product
        .variants
        .nodes
        .into_iter()
        .next()
        .ok_or_else(|| missing(&format!("variant from {mutation}")))?;
    let inventory_item = variant
        .inventory_item
        .ok_or_else(|| missing(&format!("inventory item from {mutation}")))?;

    Ok(ProductHandle {
        product_id: product.id,
        variant_id: variant.id,
        inventory_item_id: inventory_item.id,
    })
}

fn image_ids(nodes: Vec<queries::get_product_media::MediaNode>) -> Vec<String> {
    nodes
        .into_iter()
        .filter(|m| m.typename == "MediaImage")
        .filter_map(|m| m.id)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn payload(json: &str) -> Option<queries::ProductNode> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_product_handle_takes_default_variant() {
        let product = payload(
            r#"{"id": "gid://shopify/Product/9", "variants": {"nodes": [
                {"id": "gid://shopify/ProductVariant/90",
                 "inventoryItem": {"id": "gid://shopify/InventoryItem/900"}}
            ]}}"#,
        );
        let handle = product_handle(product, "productCreate").unwrap();
        assert_eq!(handle.product_id, "gid://shopify/Product/9");
        assert_eq!(handle.variant_id, "gid://shopify/ProductVariant/90");
        assert_eq!(handle.inventory_item_id, "gid://shopify/InventoryItem/900");
    }

    #[test]
    fn test_product_handle_requires_variant_and_inventory_item() {
        let no_variant = payload(r#"{"id": "gid://shopify/Product/9", "variants": {"nodes": []}}"#);
        assert_eq!(
            product_handle(no_variant, "productUpdate").unwrap_err().to_string(),
            "GraphQL errors: No variant from productUpdate returned"
        );

        let no_item = payload(
            r#"{"id": "gid://shopify/Product/9", "variants": {"nodes": [
                {"id": "gid://shopify/ProductVariant/90", "inventoryItem": null}
            ]}}"#,
        );
        assert!(product_handle(no_item, "productCreate").is_err());
        assert!(product_handle(None, "productCreate").is_err());
    }

    #[test]
    fn test_only_image_media_is_listed() {
        let nodes: Vec<queries::get_product_media::MediaNode> = serde_json::from_str(
            r#"[
                {"__typename": "MediaImage", "id": "gid://shopify/MediaImage/1"},
                {"__typename": "Video", "id": "gid://shopify/Video/2"},
                {"__typename": "MediaImage", "id": null}
            ]"#,
        )
        .unwrap();
        assert_eq!(image_ids(nodes), vec!["gid://shopify/MediaImage/1"]);
    }

    #[test]
    fn test_product_input_carries_seo() {
        let fields = ProductFields {
            title: "Combi steamer".into(),
            description_html: "<p>10 trays</p>".into(),
            seo_title: "Combi steamer".into(),
            seo_description: String::new(),
        };
        let json = serde_json::to_value(product_input(None, &fields)).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["descriptionHtml"], "<p>10 trays</p>");
        assert_eq!(json["seo"]["title"], "Combi steamer");
    }
}
