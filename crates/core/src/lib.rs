//! Magbridge Core - collection menu model and shared catalog types.
//!
//! This crate provides the pieces shared by every Magbridge component:
//! - `admin` - Embedded Shopify admin service (Magento sync, menu editor)
//! - `cli` - Command-line tools for migrations and maintenance
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. Callers fetch data, pass it in, and
//! persist whatever comes back out.
//!
//! # Modules
//!
//! - [`menu`] - Collection menu tree: flatten/rebuild, merge with live
//!   collections, build from Magento categories, drag reordering
//! - [`types`] - Type-safe IDs and the Magento attribute kind union

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod menu;
pub mod types;

pub use menu::{
    DEFAULT_INDENT_STEP_PX, DEFAULT_VERSION_PREFIX, FlatEntry, LiveCollection, ReorderGesture,
    SourceCategory, TreeNode, build_from_source, flatten, lenient_id, merge, rebuild, reorder,
    version_name,
};
pub use types::*;
