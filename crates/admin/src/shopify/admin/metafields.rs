//! Metafield definition and metaobject calls used by attribute sync.

use std::collections::HashSet;

use magbridge_core::{METAFIELD_NAMESPACE, METAFIELD_OWNER, MetafieldDefinitionSpec};
use tracing::instrument;

use super::{AdminClient, PAGE_SIZE, check_user_errors, missing, queries};
use crate::shopify::{
    AdminShopifyError, METAOBJECT_ADMIN_ACCESS, METAOBJECT_DISPLAY_NAME_KEY,
    METAOBJECT_STOREFRONT_ACCESS, MetaobjectDefinition, MetaobjectOption,
};

impl AdminClient {
    /// Keys (`namespace.key`) of every product metafield definition in the
    /// `magento` namespace.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    #[instrument(skip(self))]
    pub async fn existing_metafield_keys(&self) -> Result<HashSet<String>, AdminShopifyError> {
        let mut keys = HashSet::new();
        let mut after = None;

        loop {
            let variables = queries::get_metafield_definitions::Variables {
                namespace: METAFIELD_NAMESPACE.to_string(),
                owner_type: METAFIELD_OWNER.to_string(),
                first: PAGE_SIZE,
                after,
            };
            let response = self
                .execute::<queries::GetMetafieldDefinitions>(variables)
                .await?;
            let page = response.metafield_definitions;

            keys.extend(
                page.nodes
                    .into_iter()
                    .map(|d| format!("{}.{}", d.namespace, d.key)),
            );

            match page.page_info.end_cursor {
                Some(cursor) if page.page_info.has_next_page => after = Some(cursor),
                _ => break,
            }
        }

        Ok(keys)
    }

    /// Create a product metafield definition.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns user errors.
    #[instrument(skip(self, definition), fields(key = %definition.key, kind = %definition.kind))]
    pub async fn create_metafield_definition(
        &self,
        definition: MetafieldDefinitionSpec,
    ) -> Result<String, AdminShopifyError> {
        let variables = queries::metafield_definition_create::Variables { definition };
        let response = self
            .execute::<queries::MetafieldDefinitionCreate>(variables)
            .await?;

        let payload = response
            .metafield_definition_create
            .ok_or_else(|| missing("metafieldDefinitionCreate payload"))?;
        check_user_errors(&payload.user_errors)?;

        payload
            .created_definition
            .map(|d| d.id)
            .ok_or_else(|| missing("metafield definition"))
    }

    /// Look up a metaobject definition by its type.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_metaobject_definition(
        &self,
        kind: &str,
    ) -> Result<Option<MetaobjectDefinition>, AdminShopifyError> {
        let variables = queries::get_metaobject_definition_by_type::Variables {
            kind: kind.to_string(),
        };
        let response = self
            .execute::<queries::GetMetaobjectDefinitionByType>(variables)
            .await?;

        Ok(response.metaobject_definition_by_type.map(|d| {
            let access = d.access.unwrap_or(queries::MetaobjectAccess {
                admin: None,
                storefront: None,
            });
            MetaobjectDefinition {
                id: d.id,
                kind: d.kind,
                display_name_key: d.display_name_key,
                admin_access: access.admin,
                storefront_access: access.storefront,
            }
        }))
    }

    /// Make sure the option metaobject definition for `kind` exists with
    /// merchant read/write, public storefront read and `label` as display
    /// name. Returns the definition id.
    ///
    /// # Errors
    ///
    /// Returns an error if a request fails, or creation fails for a reason
    /// other than the definition already existing.
    #[instrument(skip(self))]
    pub async fn ensure_metaobject_definition(
        &self,
        kind: &str,
        name: &str,
    ) -> Result<String, AdminShopifyError> {
        if let Some(existing) = self.get_metaobject_definition(kind).await? {
            return self.repair_metaobject_definition(existing).await;
        }

        let variables = queries::metaobject_definition_create::Variables {
            definition: queries::metaobject_definition_create::DefinitionInput {
                kind: kind.to_string(),
                name: name.to_string(),
                display_name_key: METAOBJECT_DISPLAY_NAME_KEY.to_string(),
                access: required_access(),
                field_definitions: vec![
                    option_field("label", "Label"),
                    option_field("value", "Value"),
                ],
            },
        };
        let response = self
            .execute::<queries::MetaobjectDefinitionCreate>(variables)
            .await?;
        let payload = response
            .metaobject_definition_create
            .ok_or_else(|| missing("metaobjectDefinitionCreate payload"))?;

        if let Some(created) = payload.metaobject_definition {
            tracing::info!(kind, id = %created.id, "Created metaobject definition");
            return Ok(created.id);
        }

        if !payload
            .user_errors
            .iter()
            .any(|e| e.message.to_lowercase().contains("already exists"))
        {
            check_user_errors(&payload.user_errors)?;
            return Err(missing("metaobject definition"));
        }

        let existing = self
            .get_metaobject_definition(kind)
            .await?
            .ok_or_else(|| {
                AdminShopifyError::NotFound(format!("metaobject definition {kind}"))
            })?;
        self.repair_metaobject_definition(existing).await
    }

    async fn repair_metaobject_definition(
        &self,
        existing: MetaobjectDefinition,
    ) -> Result<String, AdminShopifyError> {
        if !existing.needs_repair() {
            return Ok(existing.id);
        }

        let variables = queries::metaobject_definition_update::Variables {
            id: existing.id.clone(),
            definition: queries::metaobject_definition_update::DefinitionInput {
                display_name_key: METAOBJECT_DISPLAY_NAME_KEY.to_string(),
                access: required_access(),
            },
        };
        let response = self
            .execute::<queries::MetaobjectDefinitionUpdate>(variables)
            .await?;
        if let Some(payload) = response.metaobject_definition_update {
            check_user_errors(&payload.user_errors)?;
        }

        tracing::info!(kind = %existing.kind, "Repaired metaobject definition access");
        Ok(existing.id)
    }

    /// Every option entry of a metaobject type.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    #[instrument(skip(self))]
    pub async fn list_metaobject_options(
        &self,
        kind: &str,
    ) -> Result<Vec<MetaobjectOption>, AdminShopifyError> {
        let mut options = Vec::new();
        let mut after = None;

        loop {
            let variables = queries::get_metaobjects::Variables {
                kind: kind.to_string(),
                first: PAGE_SIZE,
                after,
            };
            let response = self.execute::<queries::GetMetaobjects>(variables).await?;
            let page = response.metaobjects;

            options.extend(page.nodes.into_iter().map(|node| {
                let field = |key: &str| {
                    node.fields
                        .iter()
                        .find(|f| f.key == key)
                        .and_then(|f| f.value.clone())
                };
                MetaobjectOption {
                    label: field("label"),
                    value: field("value"),
                    id: node.id,
                }
            }));

            match page.page_info.end_cursor {
                Some(cursor) if page.page_info.has_next_page => after = Some(cursor),
                _ => break,
            }
        }

        Ok(options)
    }

    /// Create one option entry with `label` and `value` fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns user errors.
    #[instrument(skip(self))]
    pub async fn create_metaobject_option(
        &self,
        kind: &str,
        label: &str,
        value: &str,
    ) -> Result<String, AdminShopifyError> {
        let variables = queries::metaobject_create::Variables {
            metaobject: queries::metaobject_create::MetaobjectInput {
                kind: kind.to_string(),
                fields: vec![
                    queries::FieldValue {
                        key: "label".to_string(),
                        value: Some(label.trim().to_string()),
                    },
                    queries::FieldValue {
                        key: "value".to_string(),
                        value: Some(value.trim().to_string()),
                    },
                ],
            },
        };
        let response = self.execute::<queries::MetaobjectCreate>(variables).await?;
        let payload = response
            .metaobject_create
            .ok_or_else(|| missing("metaobjectCreate payload"))?;
        check_user_errors(&payload.user_errors)?;

        payload
            .metaobject
            .map(|m| m.id)
            .ok_or_else(|| missing("metaobject"))
    }
}

fn required_access() -> queries::MetaobjectAccess {
    queries::MetaobjectAccess {
        admin: Some(METAOBJECT_ADMIN_ACCESS.to_string()),
        storefront: Some(METAOBJECT_STOREFRONT_ACCESS.to_string()),
    }
}

fn option_field(key: &str, name: &str) -> queries::FieldDefinitionInput {
    queries::FieldDefinitionInput {
        key: key.to_string(),
        name: name.to_string(),
        kind: "single_line_text_field".to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_input_json_shape() {
        let input = queries::metaobject_definition_create::DefinitionInput {
            kind: "$app:magento_color_option".into(),
            name: "Color".into(),
            display_name_key: METAOBJECT_DISPLAY_NAME_KEY.into(),
            access: required_access(),
            field_definitions: vec![option_field("label", "Label")],
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "$app:magento_color_option",
                "name": "Color",
                "displayNameKey": "label",
                "access": {"admin": "MERCHANT_READ_WRITE", "storefront": "PUBLIC_READ"},
                "fieldDefinitions": [
                    {"key": "label", "name": "Label", "type": "single_line_text_field"}
                ]
            })
        );
    }
}
