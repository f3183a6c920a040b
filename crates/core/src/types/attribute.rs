//! Magento attribute kinds and their Shopify metafield shape.
//!
//! A Magento attribute is described by its `frontend_input` (and, for a few
//! well-known attributes, its code). [`AttributeKind`] is the closed set of
//! inputs the bridge knows how to carry over; everything else is reported
//! as unsupported rather than guessed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Metafield namespace every synced attribute lives under.
pub const METAFIELD_NAMESPACE: &str = "magento";

/// Owner type of every synced metafield definition.
pub const METAFIELD_OWNER: &str = "PRODUCT";

/// Supported Magento attribute kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    /// Single choice; options become metaobject entries.
    Select,
    /// Multiple choice; options become metaobject entries.
    MultiSelect,
    RichText,
    SingleLineText,
    MultiLineText,
    Decimal,
    Boolean,
}

impl AttributeKind {
    /// Resolve a Magento attribute into a supported kind.
    ///
    /// Choice inputs win over the attribute code; `short_description` is
    /// rich text whatever input Magento reports for it.
    #[must_use]
    pub fn from_magento(frontend_input: &str, attribute_code: &str) -> Option<Self> {
        match frontend_input {
            "select" => return Some(Self::Select),
            "multiselect" => return Some(Self::MultiSelect),
            _ => {}
        }
        if attribute_code == "short_description" {
            return Some(Self::RichText);
        }
        match frontend_input {
            "text" | "varchar" => Some(Self::SingleLineText),
            "textarea" => Some(Self::MultiLineText),
            "price" | "decimal" => Some(Self::Decimal),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }

    /// Shopify metafield type for values of this kind.
    #[must_use]
    pub const fn metafield_type(self) -> &'static str {
        match self {
            Self::Select => "metaobject_reference",
            Self::MultiSelect => "list.metaobject_reference",
            Self::RichText => "rich_text_field",
            Self::SingleLineText => "single_line_text_field",
            Self::MultiLineText => "multi_line_text_field",
            Self::Decimal => "number_decimal",
            Self::Boolean => "boolean",
        }
    }

    /// Whether values point at metaobject entries holding the options.
    #[must_use]
    pub const fn is_choice(self) -> bool {
        matches!(self, Self::Select | Self::MultiSelect)
    }

    /// Metafield definition for an attribute of this kind.
    ///
    /// # Errors
    ///
    /// Returns `AttributeError::MissingMetaobjectDefinition` for a choice
    /// kind when `metaobject_definition_id` is `None`.
    pub fn definition(
        self,
        code: &str,
        name: &str,
        metaobject_definition_id: Option<&str>,
    ) -> Result<MetafieldDefinitionSpec, AttributeError> {
        let validations = if self.is_choice() {
            let id = metaobject_definition_id
                .ok_or_else(|| AttributeError::MissingMetaobjectDefinition(code.to_owned()))?;
            vec![MetafieldValidation {
                name: "metaobject_definition_id".to_owned(),
                value: id.to_owned(),
            }]
        } else {
            Vec::new()
        };

        Ok(MetafieldDefinitionSpec {
            owner_type: METAFIELD_OWNER.to_owned(),
            namespace: METAFIELD_NAMESPACE.to_owned(),
            key: code.to_owned(),
            name: (if name.trim().is_empty() { code } else { name }).to_owned(),
            kind: self.metafield_type().to_owned(),
            validations,
        })
    }
}

/// Metaobject type holding the options of a choice attribute.
///
/// App-reserved (`$app:`) so the app may set admin access on it.
#[must_use]
pub fn metaobject_type(code: &str) -> String {
    format!("$app:magento_{code}_option")
}

/// Fully qualified metafield key, e.g. `magento.color`.
#[must_use]
pub fn metafield_key(code: &str) -> String {
    format!("{METAFIELD_NAMESPACE}.{code}")
}

/// `MetafieldDefinitionInput` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetafieldDefinitionSpec {
    pub owner_type: String,
    pub namespace: String,
    pub key: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validations: Vec<MetafieldValidation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetafieldValidation {
    pub name: String,
    pub value: String,
}

/// Errors building attribute payloads.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttributeError {
    #[error("attribute {0}: metaobject definition id is required for choice attributes")]
    MissingMetaobjectDefinition(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_magento_mapping() {
        let cases = [
            ("select", "color", Some(AttributeKind::Select)),
            ("multiselect", "material", Some(AttributeKind::MultiSelect)),
            ("textarea", "short_description", Some(AttributeKind::RichText)),
            ("text", "sku_alias", Some(AttributeKind::SingleLineText)),
            ("varchar", "brand", Some(AttributeKind::SingleLineText)),
            ("textarea", "care", Some(AttributeKind::MultiLineText)),
            ("price", "msrp", Some(AttributeKind::Decimal)),
            ("decimal", "weight", Some(AttributeKind::Decimal)),
            ("boolean", "is_new", Some(AttributeKind::Boolean)),
            ("media_image", "thumbnail", None),
            ("date", "news_from", None),
        ];
        for (input, code, expected) in cases {
            assert_eq!(AttributeKind::from_magento(input, code), expected, "{input}/{code}");
        }
    }

    #[test]
    fn test_choice_input_beats_code_override() {
        assert_eq!(
            AttributeKind::from_magento("select", "short_description"),
            Some(AttributeKind::Select)
        );
    }

    #[test]
    fn test_metafield_types() {
        assert_eq!(AttributeKind::Select.metafield_type(), "metaobject_reference");
        assert_eq!(AttributeKind::MultiSelect.metafield_type(), "list.metaobject_reference");
        assert_eq!(AttributeKind::Decimal.metafield_type(), "number_decimal");
    }

    #[test]
    fn test_choice_definition_carries_validation() {
        let def = AttributeKind::Select
            .definition("color", "Color", Some("gid://shopify/MetaobjectDefinition/1"))
            .unwrap();
        let json = serde_json::to_value(&def).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "ownerType": "PRODUCT",
                "namespace": "magento",
                "key": "color",
                "name": "Color",
                "type": "metaobject_reference",
                "validations": [{
                    "name": "metaobject_definition_id",
                    "value": "gid://shopify/MetaobjectDefinition/1"
                }]
            })
        );
    }

    #[test]
    fn test_choice_definition_requires_metaobject() {
        assert_eq!(
            AttributeKind::MultiSelect.definition("size", "Size", None),
            Err(AttributeError::MissingMetaobjectDefinition("size".into()))
        );
    }

    #[test]
    fn test_plain_definition_has_no_validations_and_falls_back_to_code() {
        let def = AttributeKind::Boolean.definition("is_new", "  ", None).unwrap();
        assert_eq!(def.name, "is_new");
        assert!(def.validations.is_empty());
        let json = serde_json::to_value(&def).unwrap();
        assert!(json.get("validations").is_none());
    }

    #[test]
    fn test_metaobject_type_and_key() {
        assert_eq!(metaobject_type("tuerart"), "$app:magento_tuerart_option");
        assert_eq!(metafield_key("tuerart"), "magento.tuerart");
    }
}
