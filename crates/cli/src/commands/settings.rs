//! Settings commands.
//!
//! ```bash
//! magbridge settings get
//! magbridge settings get magento_url
//! magbridge settings set magento_url https://shop.example
//! ```
//!
//! A running admin service picks up a change once its cached entry expires.

use magbridge_admin::db::SettingsRepository;
use magbridge_admin::magento::MagentoSite;
use magbridge_admin::services::settings::{
    MAGENTO_PUSH_ENDPOINT, MAGENTO_TOKEN, MAGENTO_URL, is_secret,
};

use super::{CommandError, connect};

const KNOWN_KEYS: [&str; 3] = [MAGENTO_URL, MAGENTO_PUSH_ENDPOINT, MAGENTO_TOKEN];

/// Print one setting, or every stored setting. Secrets are masked.
pub async fn get(key: Option<&str>) -> Result<(), CommandError> {
    let pool = connect().await?;
    let repo = SettingsRepository::new(&pool);

    let rows = match key {
        Some(key) => repo
            .get(key)
            .await?
            .map(|value| vec![(key.to_string(), value)])
            .unwrap_or_default(),
        None => repo.list().await?,
    };

    #[allow(clippy::print_stdout)]
    {
        for (key, value) in &rows {
            println!("{key} = {}", display_value(key, value));
        }
    }
    if rows.is_empty() {
        tracing::warn!("No settings stored");
    }
    Ok(())
}

/// Store one setting.
pub async fn set(key: &str, value: &str) -> Result<(), CommandError> {
    let value = validate(key, value)?;
    let pool = connect().await?;
    SettingsRepository::new(&pool).set(key, &value).await?;
    tracing::info!(key, "Setting saved");
    Ok(())
}

fn display_value(key: &str, value: &str) -> String {
    if is_secret(key) {
        "********".to_string()
    } else {
        value.to_string()
    }
}

fn validate(key: &str, value: &str) -> Result<String, CommandError> {
    if !KNOWN_KEYS.contains(&key) {
        return Err(CommandError::Invalid(format!(
            "Unknown setting {key}; expected one of {}",
            KNOWN_KEYS.join(", ")
        )));
    }
    let value = value.trim();
    if value.is_empty() {
        return Err(CommandError::Invalid(format!("{key} must not be empty")));
    }
    if key == MAGENTO_URL {
        MagentoSite::new(value, None).map_err(|e| CommandError::Invalid(e.to_string()))?;
    }
    Ok(value.to_string())
}
