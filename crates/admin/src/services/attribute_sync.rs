//! Push Magento product attributes to Shopify as product metafields.
//!
//! Choice attributes (`select`, `multiselect`) get a metaobject type whose
//! entries hold the Magento options; the metafield then references those
//! entries. Everything else maps onto a scalar metafield type.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::instrument;

use magbridge_core::{AttributeKind, METAFIELD_NAMESPACE, metafield_key, metaobject_type};

use super::{ServiceError, SyncMode};
use crate::db::{AttributeMap, AttributeMapRepository, NewAttributeMap};
use crate::magento::{MagentoAttribute, MagentoClient, MagentoOption, MagentoSite};
use crate::shopify::AdminClient;

/// A Magento attribute with its expected and current Shopify shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeListing {
    pub code: String,
    pub label: Option<String>,
    pub input: Option<String>,
    /// `None` for inputs the bridge cannot carry over.
    pub expected_shopify_type: Option<&'static str>,
    pub shopify_namespace: Option<String>,
    pub shopify_key: Option<String>,
    pub shopify_type: Option<String>,
    pub metaobject_handle: Option<String>,
    pub metaobject_type_id: Option<String>,
    pub is_synced: bool,
}

/// A sync or resync submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeSyncRequest {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub input: String,
}

/// Outcome of a sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeSyncReport {
    pub mapping: AttributeMap,
    pub metaobject_options_created: usize,
}

/// Annotate attributes with their mappings, keeping the export order.
#[must_use]
pub fn listings(attributes: Vec<MagentoAttribute>, maps: Vec<AttributeMap>) -> Vec<AttributeListing> {
    let mut by_code: HashMap<String, AttributeMap> = maps
        .into_iter()
        .map(|m| (m.magento_attribute_code.clone(), m))
        .collect();

    attributes
        .into_iter()
        .map(|a| {
            let expected = a
                .frontend_input
                .as_deref()
                .and_then(|input| AttributeKind::from_magento(input, &a.attribute_code))
                .map(AttributeKind::metafield_type);
            let map = by_code.remove(&a.attribute_code);
            AttributeListing {
                is_synced: map.is_some(),
                shopify_namespace: map.as_ref().map(|m| m.shopify_namespace.clone()),
                shopify_key: map.as_ref().map(|m| m.shopify_key.clone()),
                shopify_type: map.as_ref().map(|m| m.shopify_type.clone()),
                metaobject_handle: map.as_ref().and_then(|m| m.metaobject_handle.clone()),
                metaobject_type_id: map.and_then(|m| m.metaobject_type_id),
                expected_shopify_type: expected,
                code: a.attribute_code,
                label: a.frontend_label,
                input: a.frontend_input,
            }
        })
        .collect()
}

/// Options whose trimmed label is not in `existing`, first occurrence
/// winning. Blank labels are skipped.
#[must_use]
pub fn options_to_create<'a>(
    existing: impl IntoIterator<Item = String>,
    options: &'a [MagentoOption],
) -> Vec<&'a MagentoOption> {
    let mut seen: HashSet<String> = existing.into_iter().collect();
    options
        .iter()
        .filter(|o| {
            let label = o.label.trim();
            !label.is_empty() && seen.insert(label.to_string())
        })
        .collect()
}

/// Resolve the submission to a code, display name and kind.
///
/// # Errors
///
/// Returns `ServiceError::Invalid` for a blank code or input, or an input
/// the bridge does not support.
pub fn resolve(request: &AttributeSyncRequest) -> Result<(&str, &str, AttributeKind), ServiceError> {
    let code = request.code.trim();
    let input = request.input.trim();
    if code.is_empty() || input.is_empty() {
        return Err(ServiceError::Invalid("Missing required fields".to_string()));
    }
    let kind = AttributeKind::from_magento(input, code)
        .ok_or_else(|| ServiceError::Invalid(format!("Unsupported attribute type: {input}")))?;
    let name = request
        .label
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(code);
    Ok((code, name, kind))
}

/// Sync one attribute.
///
/// # Errors
///
/// Returns `ServiceError::Invalid` for an unusable submission, or the first
/// upstream/storage failure. Options created before a failure stay in
/// Shopify; a later resync skips them.
#[instrument(skip(pool, shopify, magento, site, request), fields(code = %request.code))]
pub async fn sync(
    pool: &PgPool,
    shopify: &AdminClient,
    magento: &MagentoClient,
    site: &MagentoSite,
    request: &AttributeSyncRequest,
    mode: SyncMode,
) -> Result<AttributeSyncReport, ServiceError> {
    let (code, name, kind) = resolve(request)?;
    let repo = AttributeMapRepository::new(pool);

    let mut handle = None;
    let mut type_id = None;
    let mut created = 0;

    if kind.is_choice() {
        let kind_name = metaobject_type(code);
        let ensured = shopify.ensure_metaobject_definition(&kind_name, name).await?;

        let options = magento
            .attribute(site, code)
            .await?
            .map(|a| a.values)
            .unwrap_or_default();
        let existing = shopify
            .list_metaobject_options(&kind_name)
            .await?
            .into_iter()
            .filter_map(|o| o.label.map(|l| l.trim().to_string()));

        for option in options_to_create(existing, &options) {
            shopify
                .create_metaobject_option(&kind_name, &option.label, &option.value)
                .await?;
            created += 1;
        }

        handle = Some(kind_name);
        type_id = Some(ensured);
    }

    if mode == SyncMode::Sync {
        let existing_keys = shopify.existing_metafield_keys().await?;
        if !existing_keys.contains(&metafield_key(code)) {
            let definition = kind
                .definition(code, name, type_id.as_deref())
                .map_err(|e| ServiceError::Invalid(e.to_string()))?;
            shopify.create_metafield_definition(definition).await?;
        }
    }

    let mapping = repo
        .upsert(&NewAttributeMap {
            magento_attribute_code: code,
            shopify_namespace: METAFIELD_NAMESPACE,
            shopify_key: code,
            shopify_type: kind.metafield_type(),
            metaobject_handle: handle.as_deref(),
            metaobject_type_id: type_id.as_deref(),
        })
        .await?;

    tracing::info!(
        shopify_type = %mapping.shopify_type,
        options_created = created,
        ?mode,
        "Synced attribute"
    );

    Ok(AttributeSyncReport {
        mapping,
        metaobject_options_created: created,
    })
}
