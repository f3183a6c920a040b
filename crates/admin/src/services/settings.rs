//! Magento connection settings.
//!
//! Settings live in `admin.app_setting` and are read on almost every Magento
//! call, so reads go through a [`SettingsCache`]. Entries expire by the
//! injected [`Clock`], which lets tests move time without sleeping, and a
//! save invalidates the keys it wrote.

use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use moka::future::Cache;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::instrument;

use super::ServiceError;
use crate::db::{RepositoryError, SettingsRepository};
use crate::magento::{MagentoError, MagentoSite};

/// Magento base URL.
pub const MAGENTO_URL: &str = "magento_url";
/// Magento endpoint that receives the product map.
pub const MAGENTO_PUSH_ENDPOINT: &str = "magento_push_endpoint";
/// Bearer token for Magento; write-only from the outside.
pub const MAGENTO_TOKEN: &str = "magento_token";

/// Push endpoint used until one is saved.
pub const DEFAULT_PUSH_ENDPOINT: &str = "/rest/V1/shopify/product-map";

const CACHE_CAPACITY: u64 = 64;

// =============================================================================
// Clock
// =============================================================================

/// Source of the current time.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    #[must_use]
    pub const fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(next) = TimeDelta::from_std(by)
            .ok()
            .and_then(|by| now.checked_add_signed(by))
        {
            *now = next;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// SettingsCache
// =============================================================================

#[derive(Debug, Clone)]
struct CachedValue {
    value: Option<String>,
    fetched_at: DateTime<Utc>,
}

/// Per-key settings cache with a time-to-live.
///
/// Missing keys are cached too, so an unset setting does not hit the
/// database on every request.
#[derive(Clone)]
pub struct SettingsCache {
    entries: Cache<String, CachedValue>,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl SettingsCache {
    /// Create a cache whose entries stay fresh for `ttl` as measured by `clock`.
    #[must_use]
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Cache::builder().max_capacity(CACHE_CAPACITY).build(),
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            clock,
        }
    }

    /// Return the cached value of `key`, or run `fetch` and cache its result
    /// when the entry is missing or stale. Errors are not cached.
    ///
    /// # Errors
    ///
    /// Returns whatever `fetch` fails with.
    pub async fn get_with<F, Fut, E>(&self, key: &str, fetch: F) -> Result<Option<String>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<String>, E>>,
    {
        let now = self.clock.now();
        if let Some(cached) = self.entries.get(key).await
            && now.signed_duration_since(cached.fetched_at) < self.ttl
        {
            return Ok(cached.value);
        }

        let value = fetch().await?;
        self.entries
            .insert(
                key.to_string(),
                CachedValue {
                    value: value.clone(),
                    fetched_at: now,
                },
            )
            .await;
        Ok(value)
    }

    /// Drop the cached entry for `key`.
    pub async fn invalidate(&self, key: &str) {
        self.entries.invalidate(key).await;
    }
}

impl fmt::Debug for SettingsCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsCache")
            .field("ttl", &self.ttl)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Magento settings
// =============================================================================

/// Resolved Magento settings.
#[derive(Clone)]
pub struct MagentoSettings {
    pub magento_url: String,
    pub push_endpoint: String,
    pub token: Option<SecretString>,
}

impl MagentoSettings {
    /// Whether a token is stored.
    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// The site to call.
    ///
    /// # Errors
    ///
    /// Returns `NotConfigured` until a Magento URL has been saved.
    pub fn site(&self) -> Result<MagentoSite, MagentoError> {
        MagentoSite::new(&self.magento_url, self.token.clone())
    }

    /// The shape returned to the settings page. Never includes the token.
    #[must_use]
    pub fn view(&self) -> SettingsView {
        SettingsView {
            magento_url: self.magento_url.clone(),
            magento_endpoint: self.push_endpoint.clone(),
            has_token: self.has_token(),
        }
    }
}

impl fmt::Debug for MagentoSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MagentoSettings")
            .field("magento_url", &self.magento_url)
            .field("push_endpoint", &self.push_endpoint)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Settings as shown to the merchant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    pub magento_url: String,
    pub magento_endpoint: String,
    pub has_token: bool,
}

/// A settings form submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    #[serde(default)]
    pub magento_url: String,
    #[serde(default)]
    pub magento_endpoint: Option<String>,
    #[serde(default)]
    pub magento_token: Option<String>,
}

/// Key/value pairs a valid update writes, in write order.
fn writes(update: &SettingsUpdate) -> Result<Vec<(&'static str, String)>, ServiceError> {
    let url = update.magento_url.trim();
    if url.is_empty() {
        return Err(ServiceError::Invalid("Magento URL is required".to_string()));
    }
    MagentoSite::new(url, None).map_err(|e| ServiceError::Invalid(e.to_string()))?;

    let endpoint = update
        .magento_endpoint
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_PUSH_ENDPOINT);

    let mut writes = vec![
        (MAGENTO_URL, url.to_string()),
        (MAGENTO_PUSH_ENDPOINT, endpoint.to_string()),
    ];
    if let Some(token) = update
        .magento_token
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        writes.push((MAGENTO_TOKEN, token.to_string()));
    }
    Ok(writes)
}

async fn cached_setting(
    pool: &PgPool,
    cache: &SettingsCache,
    key: &str,
) -> Result<Option<String>, RepositoryError> {
    cache
        .get_with(key, || async move { SettingsRepository::new(pool).get(key).await })
        .await
}

/// Load the Magento settings, through the cache.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if a read fails.
#[instrument(skip(pool, cache))]
pub async fn load(pool: &PgPool, cache: &SettingsCache) -> Result<MagentoSettings, RepositoryError> {
    let magento_url = cached_setting(pool, cache, MAGENTO_URL).await?;
    let push_endpoint = cached_setting(pool, cache, MAGENTO_PUSH_ENDPOINT).await?;
    let token = cached_setting(pool, cache, MAGENTO_TOKEN).await?;

    Ok(MagentoSettings {
        magento_url: magento_url.unwrap_or_default().trim().to_string(),
        push_endpoint: push_endpoint
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PUSH_ENDPOINT.to_string()),
        token: token
            .filter(|s| !s.trim().is_empty())
            .map(SecretString::from),
    })
}

/// Validate and store a settings update, then invalidate what it wrote.
///
/// A blank token leaves the stored token untouched.
///
/// # Errors
///
/// Returns `ServiceError::Invalid` for a missing or malformed URL and
/// `ServiceError::Repository` if a write fails.
#[instrument(skip(pool, cache, update))]
pub async fn save(
    pool: &PgPool,
    cache: &SettingsCache,
    update: &SettingsUpdate,
) -> Result<(), ServiceError> {
    let repo = SettingsRepository::new(pool);
    for (key, value) in writes(update)? {
        repo.set(key, &value).await?;
        cache.invalidate(key).await;
    }
    tracing::info!("Saved Magento settings");
    Ok(())
}

/// Whether the value stored under `key` must never be printed.
#[must_use]
pub fn is_secret(key: &str) -> bool {
    key == MAGENTO_TOKEN
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(
            DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        ))
    }

    async fn read(
        cache: &SettingsCache,
        calls: &AtomicUsize,
        value: &str,
    ) -> Option<String> {
        cache
            .get_with("magento_url", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, RepositoryError>(Some(value.to_string()))
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_cache_serves_fresh_entries() {
        let clock = clock();
        let cache = SettingsCache::new(Duration::from_secs(30), clock.clone());
        let calls = AtomicUsize::new(0);

        assert_eq!(read(&cache, &calls, "https://a").await.as_deref(), Some("https://a"));
        clock.advance(Duration::from_secs(29));
        assert_eq!(read(&cache, &calls, "https://b").await.as_deref(), Some("https://a"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cache_refetches_after_ttl() {
        let clock = clock();
        let cache = SettingsCache::new(Duration::from_secs(30), clock.clone());
        let calls = AtomicUsize::new(0);

        read(&cache, &calls, "https://a").await;
        clock.advance(Duration::from_secs(30));
        assert_eq!(read(&cache, &calls, "https://b").await.as_deref(), Some("https://b"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let cache = SettingsCache::new(Duration::from_secs(30), clock());
        let calls = AtomicUsize::new(0);

        read(&cache, &calls, "https://a").await;
        cache.invalidate("magento_url").await;
        assert_eq!(read(&cache, &calls, "https://b").await.as_deref(), Some("https://b"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache = SettingsCache::new(Duration::from_secs(30), clock());
        let failed = cache
            .get_with("magento_url", || async {
                Err::<Option<String>, _>(RepositoryError::NotFound)
            })
            .await;
        assert!(failed.is_err());

        let calls = AtomicUsize::new(0);
        assert_eq!(read(&cache, &calls, "https://a").await.as_deref(), Some("https://a"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_update_requires_url() {
        let err = writes(&SettingsUpdate::default()).unwrap_err();
        assert_eq!(err.to_string(), "Magento URL is required");

        let err = writes(&SettingsUpdate {
            magento_url: "nope".into(),
            ..SettingsUpdate::default()
        })
        .unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[test]
    fn test_update_defaults_endpoint_and_skips_blank_token() {
        let pairs = writes(&SettingsUpdate {
            magento_url: " https://shop.example ".into(),
            magento_endpoint: Some(String::new()),
            magento_token: Some("  ".into()),
        })
        .unwrap();
        assert_eq!(
            pairs,
            vec![
                (MAGENTO_URL, "https://shop.example".to_string()),
                (MAGENTO_PUSH_ENDPOINT, DEFAULT_PUSH_ENDPOINT.to_string()),
            ]
        );
    }

    #[test]
    fn test_update_writes_token_when_given() {
        let pairs = writes(&SettingsUpdate {
            magento_url: "https://shop.example".into(),
            magento_endpoint: Some("/rest/V1/custom".into()),
            magento_token: Some("tok".into()),
        })
        .unwrap();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs.last().unwrap(), &(MAGENTO_TOKEN, "tok".to_string()));
        assert!(is_secret(MAGENTO_TOKEN));
        assert!(!is_secret(MAGENTO_URL));
    }

    #[test]
    fn test_view_hides_token() {
        let settings = MagentoSettings {
            magento_url: "https://shop.example".into(),
            push_endpoint: DEFAULT_PUSH_ENDPOINT.into(),
            token: Some(SecretString::from("tok")),
        };
        let json = serde_json::to_value(settings.view()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "magentoUrl": "https://shop.example",
                "magentoEndpoint": "/rest/V1/shopify/product-map",
                "hasToken": true
            })
        );
        assert!(format!("{settings:?}").contains("[REDACTED]"));
    }

    #[test]
    fn test_unconfigured_site() {
        let settings = MagentoSettings {
            magento_url: String::new(),
            push_endpoint: DEFAULT_PUSH_ENDPOINT.into(),
            token: None,
        };
        assert!(matches!(settings.site(), Err(MagentoError::NotConfigured)));
    }
}
