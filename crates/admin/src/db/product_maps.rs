//! Magento product ↔ Shopify product mapping.
//!
//! The rows double as the payload pushed back to Magento, so Magento can
//! link its products to the Shopify copies.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tracing::instrument;

use magbridge_core::ProductMapId;

use super::RepositoryError;

/// A mapped product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMap {
    pub id: ProductMapId,
    pub magento_product_id: i64,
    pub shopify_product_id: String,
    pub sku: Option<String>,
    pub name: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct ProductMapRow {
    id: i32,
    magento_product_id: i64,
    shopify_product_id: String,
    sku: Option<String>,
    name: String,
    updated_at: DateTime<Utc>,
}

impl From<ProductMapRow> for ProductMap {
    fn from(row: ProductMapRow) -> Self {
        Self {
            id: ProductMapId::new(row.id),
            magento_product_id: row.magento_product_id,
            shopify_product_id: row.shopify_product_id,
            sku: row.sku,
            name: row.name,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for product mappings.
pub struct ProductMapRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductMapRepository<'a> {
    /// Create a new product map repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every mapping, by Magento product id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<ProductMap>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductMapRow>(
            r"
            SELECT id, magento_product_id, shopify_product_id, sku, name, updated_at
            FROM admin.product_map_magento
            ORDER BY magento_product_id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get the mapping of one Magento product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn get_by_product(
        &self,
        magento_product_id: i64,
    ) -> Result<Option<ProductMap>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductMapRow>(
            r"
            SELECT id, magento_product_id, shopify_product_id, sku, name, updated_at
            FROM admin.product_map_magento
            WHERE magento_product_id = $1
            ",
        )
        .bind(magento_product_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Record (or refresh) the Shopify product a Magento product was pushed to.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the Shopify product is already
    /// mapped to another Magento product.
    #[instrument(skip(self))]
    pub async fn upsert(
        &self,
        magento_product_id: i64,
        shopify_product_id: &str,
        sku: Option<&str>,
        name: &str,
    ) -> Result<ProductMap, RepositoryError> {
        let row = sqlx::query_as::<_, ProductMapRow>(
            r"
            INSERT INTO admin.product_map_magento (magento_product_id, shopify_product_id, sku, name)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (magento_product_id) DO UPDATE
            SET shopify_product_id = EXCLUDED.shopify_product_id,
                sku = EXCLUDED.sku,
                name = EXCLUDED.name,
                updated_at = NOW()
            RETURNING id, magento_product_id, shopify_product_id, sku, name, updated_at
            ",
        )
        .bind(magento_product_id)
        .bind(shopify_product_id)
        .bind(sku)
        .bind(name)
        .fetch_one(self.pool)
        .await
        .map_err(|e| super::conflict_or_database(e, "product already mapped to another Magento product"))?;

        Ok(row.into())
    }
}
