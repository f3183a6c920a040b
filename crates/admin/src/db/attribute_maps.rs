//! Magento attribute ↔ Shopify product metafield mapping.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tracing::instrument;

use magbridge_core::AttributeMapId;

use super::RepositoryError;

/// A synced attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeMap {
    pub id: AttributeMapId,
    pub magento_attribute_code: String,
    pub shopify_namespace: String,
    pub shopify_key: String,
    pub shopify_type: String,
    /// Metaobject type holding the options (choice attributes only).
    pub metaobject_handle: Option<String>,
    /// Metaobject definition GID (choice attributes only).
    pub metaobject_type_id: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Values written by an attribute sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttributeMap<'a> {
    pub magento_attribute_code: &'a str,
    pub shopify_namespace: &'a str,
    pub shopify_key: &'a str,
    pub shopify_type: &'a str,
    pub metaobject_handle: Option<&'a str>,
    pub metaobject_type_id: Option<&'a str>,
}

#[derive(Debug, sqlx::FromRow)]
struct AttributeMapRow {
    id: i32,
    magento_attribute_code: String,
    shopify_namespace: String,
    shopify_key: String,
    shopify_type: String,
    metaobject_handle: Option<String>,
    metaobject_type_id: Option<String>,
    updated_at: DateTime<Utc>,
}

impl From<AttributeMapRow> for AttributeMap {
    fn from(row: AttributeMapRow) -> Self {
        Self {
            id: AttributeMapId::new(row.id),
            magento_attribute_code: row.magento_attribute_code,
            shopify_namespace: row.shopify_namespace,
            shopify_key: row.shopify_key,
            shopify_type: row.shopify_type,
            metaobject_handle: row.metaobject_handle,
            metaobject_type_id: row.metaobject_type_id,
            updated_at: row.updated_at,
        }
    }
}

const COLUMNS: &str = "id, magento_attribute_code, shopify_namespace, shopify_key, shopify_type, \
                       metaobject_handle, metaobject_type_id, updated_at";

/// Repository for attribute mappings.
pub struct AttributeMapRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AttributeMapRepository<'a> {
    /// Create a new attribute map repository.
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
    pub async fn list_all(&self) -> Result<Vec<AttributeMap>, RepositoryError> {
        let rows = sqlx::query_as::<_, AttributeMapRow>(&format!(
            "SELECT {COLUMNS} FROM admin.attribute_map_metafield ORDER BY magento_attribute_code"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Insert or refresh a mapping.
    ///
    /// On update only the type and metaobject columns change; namespace and
    /// key are fixed when the attribute is first synced.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(code = new.magento_attribute_code))]
    pub async fn upsert(&self, new: &NewAttributeMap<'_>) -> Result<AttributeMap, RepositoryError> {
        let row = sqlx::query_as::<_, AttributeMapRow>(&format!(
            r"
            INSERT INTO admin.attribute_map_metafield
                (magento_attribute_code, shopify_namespace, shopify_key, shopify_type,
                 metaobject_handle, metaobject_type_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (magento_attribute_code) DO UPDATE
            SET shopify_type = EXCLUDED.shopify_type,
                metaobject_handle = EXCLUDED.metaobject_handle,
                metaobject_type_id = EXCLUDED.metaobject_type_id,
                updated_at = NOW()
            RETURNING {COLUMNS}
            "
        ))
        .bind(new.magento_attribute_code)
        .bind(new.shopify_namespace)
        .bind(new.shopify_key)
        .bind(new.shopify_type)
        .bind(new.metaobject_handle)
        .bind(new.metaobject_type_id)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }
}
