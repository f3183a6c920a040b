//! Magento category ↔ Shopify collection mapping.
//!
//! A row exists once a category has been pushed to Shopify; its presence
//! is what makes a later push an update instead of a duplicate create.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tracing::instrument;

use magbridge_core::CategoryMapId;

use super::RepositoryError;

/// A mapped category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMap {
    pub id: CategoryMapId,
    pub magento_category_id: i64,
    pub shopify_collection_id: String,
    pub name: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryMapRow {
    id: i32,
    magento_category_id: i64,
    shopify_collection_id: String,
    name: String,
    updated_at: DateTime<Utc>,
}

impl From<CategoryMapRow> for CategoryMap {
    fn from(row: CategoryMapRow) -> Self {
        Self {
            id: CategoryMapId::new(row.id),
            magento_category_id: row.magento_category_id,
            shopify_collection_id: row.shopify_collection_id,
            name: row.name,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for category mappings.
pub struct CategoryMapRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryMapRepository<'a> {
    /// Create a new category map repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every mapping.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<CategoryMap>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryMapRow>(
            r"
            SELECT id, magento_category_id, shopify_collection_id, name, updated_at
            FROM admin.collection_map_category
            ORDER BY magento_category_id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Magento category id → Shopify collection id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn id_map(&self) -> Result<HashMap<i64, String>, RepositoryError> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .map(|m| (m.magento_category_id, m.shopify_collection_id))
            .collect())
    }

    /// Get the mapping of one Magento category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn get_by_category(
        &self,
        magento_category_id: i64,
    ) -> Result<Option<CategoryMap>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryMapRow>(
            r"
            SELECT id, magento_category_id, shopify_collection_id, name, updated_at
            FROM admin.collection_map_category
            WHERE magento_category_id = $1
            ",
        )
        .bind(magento_category_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Record (or refresh) the collection a category was pushed to.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the collection is already
    /// mapped to another category.
    #[instrument(skip(self))]
    pub async fn upsert(
        &self,
        magento_category_id: i64,
        shopify_collection_id: &str,
        name: &str,
    ) -> Result<CategoryMap, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryMapRow>(
            r"
            INSERT INTO admin.collection_map_category (magento_category_id, shopify_collection_id, name)
            VALUES ($1, $2, $3)
            ON CONFLICT (magento_category_id) DO UPDATE
            SET shopify_collection_id = EXCLUDED.shopify_collection_id,
                name = EXCLUDED.name,
                updated_at = NOW()
            RETURNING id, magento_category_id, shopify_collection_id, name, updated_at
            ",
        )
        .bind(magento_category_id)
        .bind(shopify_collection_id)
        .bind(name)
        .fetch_one(self.pool)
        .await
        .map_err(|e| super::conflict_or_database(e, "collection already mapped to another category"))?;

        Ok(row.into())
    }
}
