//! Magento export payloads.

use magbridge_core::{SourceCategory, lenient_id};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Deserialize)]
pub(super) struct CategoryExport {
    #[serde(default)]
    pub items: Vec<MagentoCategory>,
}

/// A category row from the category export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagentoCategory {
    #[serde(deserialize_with = "lenient_id")]
    pub category_id: i64,
    #[serde(default, deserialize_with = "lenient_id")]
    pub parent_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<&MagentoCategory> for SourceCategory {
    fn from(c: &MagentoCategory) -> Self {
        Self::new(c.category_id, c.parent_id, c.name.clone())
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ProductExport {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<MagentoProduct>,
}

/// A simple product from the product export.
///
/// Prices and quantities arrive as numbers or numeric strings. `gallery_json`
/// is itself a JSON-encoded array of image URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagentoProduct {
    #[serde(deserialize_with = "lenient_id")]
    pub product_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar")]
    pub special_price: Option<String>,
    #[serde(default, deserialize_with = "optional_quantity")]
    pub qty: Option<i64>,
    #[serde(default, deserialize_with = "optional_quantity")]
    pub salable_qty: Option<i64>,
    #[serde(default, deserialize_with = "optional_scalar")]
    pub weight: Option<String>,
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

impl MagentoProduct {
    /// The price a shopper pays: the special price when one is set.
    #[must_use]
    pub fn effective_price(&self) -> Option<&str> {
        self.special_price.as_deref().or(self.price.as_deref())
    }

    /// Stock to publish: salable quantity, then raw quantity, then zero.
    #[must_use]
    pub fn effective_qty(&self) -> i64 {
        self.salable_qty.or(self.qty).unwrap_or(0)
    }
}

/// One row of the product mapping pushed back to Magento.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductMapEntry {
    pub magento_product_id: i64,
    pub shopify_product_id: String,
    pub sku: Option<String>,
    pub name: String,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub(super) struct ProductMapPush<'a> {
    pub status: &'static str,
    pub total: usize,
    pub items: &'a [ProductMapEntry],
}

/// A product attribute from the attribute export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagentoAttribute {
    pub attribute_code: String,
    #[serde(default)]
    pub frontend_label: Option<String>,
    #[serde(default)]
    pub frontend_input: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub values: Vec<MagentoOption>,
}

/// One option of a select attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagentoOption {
    #[serde(default, deserialize_with = "scalar_string")]
    pub label: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub value: String,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Option ids arrive as numbers or strings depending on the attribute.
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

pub(crate) fn optional_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// Quantities come back as `12`, `"12"` or `"12.0000"`. Anything else is
/// treated as unknown.
pub(crate) fn optional_quantity<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    #[allow(clippy::cast_possible_truncation)]
    Ok(value.filter(|v| v.is_finite()).map(|v| v as i64))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_export_parses_string_ids() {
        let json = r#"{"items": [{
            "category_id": "12", "parent_id": "2", "name": "Ovens",
            "image": "/media/catalog/category/ovens.jpg",
            "meta_title": null, "meta_description": "Hot", "description": ""
        }]}"#;
        let export: CategoryExport = serde_json::from_str(json).unwrap();
        let category = export.items.into_iter().next().unwrap();
        assert_eq!(category.category_id, 12);
        assert_eq!(category.meta_title, None);
        assert_eq!(SourceCategory::from(&category), SourceCategory::new(12, 2, "Ovens"));
    }

    #[test]
    fn test_null_values_and_labels() {
        let json = r#"{"attribute_code": "size", "values": null}"#;
        let attr: MagentoAttribute = serde_json::from_str(json).unwrap();
        assert!(attr.values.is_empty());

        let option: MagentoOption = serde_json::from_str(r#"{"label": null, "value": 4}"#).unwrap();
        assert_eq!(option.label, "");
        assert_eq!(option.value, "4");
    }

    #[test]
    fn test_product_export_mixed_scalars() {
        let json = r#"{"items": [{
            "product_id": "501", "name": "Combi steamer", "sku": "CS-10",
            "price": "1999.0000", "special_price": null,
            "qty": "7.0000", "salable_qty": 5, "weight": 42.5,
            "image_url": "https://shop.example/media/cs.jpg",
            "gallery_json": "[\"https://shop.example/media/cs-2.jpg\"]"
        }, {
            "product_id": 502, "name": "Tray", "price": 12, "special_price": "9.50"
        }]}"#;
        let export: ProductExport = serde_json::from_str(json).unwrap();
        let [steamer, tray] = export.items.as_slice() else {
            panic!("expected two products");
        };
        assert_eq!(steamer.product_id, 501);
        assert_eq!(steamer.effective_price(), Some("1999.0000"));
        assert_eq!(steamer.qty, Some(7));
        assert_eq!(steamer.effective_qty(), 5);
        assert_eq!(steamer.weight.as_deref(), Some("42.5"));
        assert_eq!(tray.effective_price(), Some("9.50"));
        assert_eq!(tray.effective_qty(), 0);
        assert_eq!(tray.gallery_json, None);
    }

    #[test]
    fn test_null_product_list_is_empty() {
        let export: ProductExport = serde_json::from_str(r#"{"items": null}"#).unwrap();
        assert!(export.items.is_empty());
    }
}
