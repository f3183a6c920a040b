//! Database operations for the bridge's `PostgreSQL` schema.
//!
//! ## Tables (schema `admin`)
//!
//! - `collection_menu_version` - Append-only menu snapshots, one active per shop
//! - `collection_map_category` - Magento category ↔ Shopify collection
//! - `attribute_map_metafield` - Magento attribute ↔ product metafield
//! - `product_map_magento` - Magento product ↔ Shopify product
//! - `app_setting` - Key/value settings (Magento URL, endpoint, token)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p magbridge-cli -- migrate
//! ```

pub mod attribute_maps;
pub mod category_maps;
pub mod menu_versions;
pub mod product_maps;
pub mod settings;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use attribute_maps::{AttributeMap, AttributeMapRepository, NewAttributeMap};
pub use category_maps::{CategoryMap, CategoryMapRepository};
pub use menu_versions::{
    MemoryMenuVersionStore, MenuVersion, MenuVersionRepository, MenuVersionStore,
    MenuVersionSummary,
};
pub use product_maps::{ProductMap, ProductMapRepository};
pub use settings::SettingsRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., a second active menu version).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A menu version could not be saved; the previous active version is
    /// still in place.
    #[error("menu version not saved: {0}")]
    SaveFailed(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Map a unique-constraint violation to `RepositoryError::Conflict`.
pub(crate) fn conflict_or_database(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(what.to_owned());
    }
    RepositoryError::Database(e)
}
