//! Domain types for the Shopify Admin API.
//!
//! These stay separate from the wire types in `queries` so services never
//! depend on response nesting.

use serde::{Deserialize, Serialize};

use magbridge_core::LiveCollection;

/// A collection as listed for the menu editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub id: String,
    pub title: String,
    pub handle: String,
}

impl From<CollectionSummary> for LiveCollection {
    fn from(c: CollectionSummary) -> Self {
        Self::new(c.id, c.title)
    }
}

/// Fields written when a Magento category is pushed as a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionFields {
    pub title: String,
    pub description_html: String,
    pub seo_title: String,
    pub seo_description: String,
    /// Absolute image URL; `None` leaves the image untouched.
    pub image_src: Option<String>,
}

/// Fields written when a Magento product is pushed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFields {
    pub title: String,
    pub description_html: String,
    pub seo_title: String,
    pub seo_description: String,
}

/// Ids of a created or updated product and its default variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductHandle {
    pub product_id: String,
    pub variant_id: String,
    pub inventory_item_id: String,
}

/// Reason recorded on on-hand quantity changes.
pub const ON_HAND_REASON: &str = "correction";

/// A sales channel publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub id: String,
    pub name: String,
}

/// Publication every pushed collection is published to.
pub const ONLINE_STORE_PUBLICATION: &str = "Online Store";

/// Access levels the bridge requires on its option metaobject definitions.
pub const METAOBJECT_ADMIN_ACCESS: &str = "MERCHANT_READ_WRITE";
pub const METAOBJECT_STOREFRONT_ACCESS: &str = "PUBLIC_READ";
pub const METAOBJECT_DISPLAY_NAME_KEY: &str = "label";

/// A metaobject definition as far as the bridge cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaobjectDefinition {
    pub id: String,
    pub kind: String,
    pub display_name_key: Option<String>,
    pub admin_access: Option<String>,
    pub storefront_access: Option<String>,
}

impl MetaobjectDefinition {
    /// Whether access or display name differ from what option entries need.
    #[must_use]
    pub fn needs_repair(&self) -> bool {
        self.display_name_key.as_deref() != Some(METAOBJECT_DISPLAY_NAME_KEY)
            || self.admin_access.as_deref() != Some(METAOBJECT_ADMIN_ACCESS)
            || self.storefront_access.as_deref() != Some(METAOBJECT_STOREFRONT_ACCESS)
    }
}

/// A metaobject option entry (`label`/`value` fields).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaobjectOption {
    pub id: String,
    pub label: Option<String>,
    pub value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition() -> MetaobjectDefinition {
        MetaobjectDefinition {
            id: "gid://shopify/MetaobjectDefinition/1".into(),
            kind: "$app:magento_color_option".into(),
            display_name_key: Some("label".into()),
            admin_access: Some("MERCHANT_READ_WRITE".into()),
            storefront_access: Some("PUBLIC_READ".into()),
        }
    }

    #[test]
    fn test_definition_in_shape_needs_no_repair() {
        assert!(!definition().needs_repair());
    }

    #[test]
    fn test_definition_repair_triggers() {
        let mut def = definition();
        def.storefront_access = Some("NONE".into());
        assert!(def.needs_repair());

        let mut def = definition();
        def.display_name_key = None;
        assert!(def.needs_repair());
    }

    #[test]
    fn test_collection_summary_into_live() {
        let live: LiveCollection = CollectionSummary {
            id: "gid://shopify/Collection/1".into(),
            title: "Ovens".into(),
            handle: "ovens".into(),
        }
        .into();
        assert_eq!(live, LiveCollection::new("gid://shopify/Collection/1", "Ovens"));
    }
}
