//! Seed a menu tree from the Magento category hierarchy.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::tree::{TreeNode, assemble_forest};

/// A Magento category row as the category endpoint returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCategory {
    #[serde(deserialize_with = "lenient_id")]
    pub category_id: i64,
    #[serde(default, deserialize_with = "lenient_id")]
    pub parent_id: i64,
    #[serde(default)]
    pub name: String,
}

impl SourceCategory {
    #[must_use]
    pub fn new(category_id: i64, parent_id: i64, name: impl Into<String>) -> Self {
        Self {
            category_id,
            parent_id,
            name: name.into(),
        }
    }
}

/// Deserialize a numeric id sent either as a JSON number or as a numeric
/// string. `null` reads as 0, which no Magento category uses.
///
/// # Errors
///
/// Fails on strings that are not integers and on non-integer JSON types.
pub fn lenient_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(0),
        Some(Raw::Number(n)) => Ok(n),
        Some(Raw::Text(s)) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid id: {s:?}"))),
    }
}

/// Build a collection tree from Magento categories.
///
/// `id_map` translates Magento category ids into Shopify collection ids.
/// Categories without a mapping are left out entirely. A mapped category
/// is attached under its parent when the parent is mapped too, otherwise it
/// becomes a root. Roots and siblings keep the input order.
///
/// A category listed as its own parent is a root. When a category id
/// repeats, the first row wins. Categories whose parent chain loops back on
/// itself never reach a root and are left out.
#[must_use]
pub fn build_from_source(
    categories: &[SourceCategory],
    id_map: &HashMap<i64, String>,
) -> Vec<TreeNode> {
    // Pass 1: index mapped categories by Magento id.
    let mut mapped: Vec<(&SourceCategory, &String)> = Vec::new();
    let mut index_by_source: HashMap<i64, usize> = HashMap::new();
    for category in categories {
        let Some(collection_id) = id_map.get(&category.category_id) else {
            continue;
        };
        if index_by_source.contains_key(&category.category_id) {
            continue;
        }
        index_by_source.insert(category.category_id, mapped.len());
        mapped.push((category, collection_id));
    }

    // Pass 2: attach each to its parent or to the root list.
    let parents: Vec<Option<usize>> = mapped
        .iter()
        .map(|(category, _)| index_by_source.get(&category.parent_id).copied())
        .collect();

    assemble_forest(&parents, |index, children| {
        mapped.get(index).map(|(category, collection_id)| {
            TreeNode::with_children((*collection_id).clone(), category.name.clone(), children)
        })
    })
}
