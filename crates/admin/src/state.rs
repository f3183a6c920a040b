//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AdminConfig;
use crate::magento::{MagentoClient, MagentoError};
use crate::services::{Clock, SettingsCache, SystemClock};
use crate::shopify::AdminClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: PgPool,
    shopify: AdminClient,
    magento: MagentoClient,
    settings: SettingsCache,
}

impl AppState {
    /// Create application state using the system clock for the settings
    /// cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the Magento HTTP client cannot be built.
    pub fn new(config: AdminConfig, pool: PgPool) -> Result<Self, MagentoError> {
        Self::with_clock(config, pool, Arc::new(SystemClock))
    }

    /// Create application state with an explicit settings clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the Magento HTTP client cannot be built.
    pub fn with_clock(
        config: AdminConfig,
        pool: PgPool,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, MagentoError> {
        let shopify = AdminClient::new(&config.shopify);
        let magento = MagentoClient::new(config.magento_timeout)?;
        let settings = SettingsCache::new(config.settings_cache_ttl, clock);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                shopify,
                magento,
                settings,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Shopify Admin API client.
    #[must_use]
    pub fn shopify(&self) -> &AdminClient {
        &self.inner.shopify
    }

    /// Magento REST client.
    #[must_use]
    pub fn magento(&self) -> &MagentoClient {
        &self.inner.magento
    }

    /// Cache in front of the settings table.
    #[must_use]
    pub fn settings(&self) -> &SettingsCache {
        &self.inner.settings
    }
}
