//! Shared catalog types.
//!
//! Row ids for the bridge's own tables and the Magento attribute kind union.

pub mod attribute;
pub mod id;

pub use attribute::{
    AttributeError, AttributeKind, METAFIELD_NAMESPACE, METAFIELD_OWNER, MetafieldDefinitionSpec,
    MetafieldValidation, metafield_key, metaobject_type,
};
pub use id::*;
