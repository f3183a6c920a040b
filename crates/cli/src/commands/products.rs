//! Product mapping commands.
//!
//! ```bash
//! magbridge products push-mapping
//! ```

use std::sync::Arc;
use std::time::Duration;

use magbridge_admin::magento::MagentoClient;
use magbridge_admin::services::{self, SettingsCache, SystemClock};

use super::{CommandError, connect};

/// One-shot commands always read settings fresh.
const NO_CACHE: Duration = Duration::ZERO;

/// Send every stored product mapping to the Magento push endpoint.
pub async fn push_mapping(timeout: Duration) -> Result<(), CommandError> {
    let pool = connect().await?;
    let cache = SettingsCache::new(NO_CACHE, Arc::new(SystemClock));
    let settings = services::settings::load(&pool, &cache).await?;
    let magento = MagentoClient::new(timeout)?;

    let pushed = services::product_sync::push_mapping(&pool, &magento, &settings).await?;
    tracing::info!(pushed, endpoint = %settings.push_endpoint, "Product mapping pushed");
    Ok(())
}
