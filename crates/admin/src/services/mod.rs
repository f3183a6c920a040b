//! Business logic services for admin.
//!
//! # Services
//!
//! - `settings` - Magento connection settings with a clock-driven cache
//! - `category_menu` - Collection menu editor: load, save, build, reorder
//! - `category_sync` - Push Magento categories as Shopify collections
//! - `attribute_sync` - Push Magento attributes as product metafields
//! - `product_sync` - Push Magento products and report the mapping back

pub mod attribute_sync;
pub mod category_menu;
pub mod category_sync;
pub mod product_sync;
pub mod settings;

use thiserror::Error;

use crate::db::RepositoryError;
use crate::magento::MagentoError;
use crate::shopify::AdminShopifyError;

pub use settings::{
    Clock, MagentoSettings, ManualClock, SettingsCache, SettingsUpdate, SettingsView, SystemClock,
};

/// First push of a Magento record, or a refresh of one already pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Create what is missing upstream.
    Sync,
    /// Update what an earlier sync created.
    Resync,
}

/// Errors raised by admin services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Shopify rejected or failed a call.
    #[error(transparent)]
    Shopify(#[from] AdminShopifyError),

    /// Magento rejected or failed a call.
    #[error(transparent)]
    Magento(#[from] MagentoError),

    /// The request itself is unusable.
    #[error("{0}")]
    Invalid(String),

    /// A referenced record does not exist.
    #[error("{0} not found")]
    NotFound(String),
}
