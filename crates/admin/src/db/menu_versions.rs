//! Menu version snapshots.
//!
//! Every save appends a row; nothing is updated in place except the
//! `is_active` flag, and at most one row per shop carries it.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tokio::sync::Mutex;
use tracing::instrument;

use magbridge_core::{MenuVersionId, TreeNode};

use super::RepositoryError;

/// A stored menu snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuVersion {
    pub id: MenuVersionId,
    pub shop: String,
    pub version_name: String,
    pub menu: Vec<TreeNode>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// A snapshot without its tree, for version pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuVersionSummary {
    pub id: MenuVersionId,
    pub version_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&MenuVersion> for MenuVersionSummary {
    fn from(version: &MenuVersion) -> Self {
        Self {
            id: version.id,
            version_name: version.version_name.clone(),
            is_active: version.is_active,
            created_at: version.created_at,
        }
    }
}

/// Storage for menu versions.
///
/// `create_active` is all-or-nothing: either the new row exists and is the
/// only active one for the shop, or nothing changed and
/// `RepositoryError::SaveFailed` is returned.
pub trait MenuVersionStore: Send + Sync {
    /// All versions of a shop, newest first.
    fn list(
        &self,
        shop: &str,
    ) -> impl Future<Output = Result<Vec<MenuVersionSummary>, RepositoryError>> + Send;

    /// One version, only if it belongs to `shop`.
    fn get(
        &self,
        shop: &str,
        id: MenuVersionId,
    ) -> impl Future<Output = Result<Option<MenuVersion>, RepositoryError>> + Send;

    /// The active version, else the most recent one.
    fn active_or_latest(
        &self,
        shop: &str,
    ) -> impl Future<Output = Result<Option<MenuVersion>, RepositoryError>> + Send;

    /// Store `menu` as the new active version of `shop`.
    fn create_active(
        &self,
        shop: &str,
        version_name: &str,
        menu: &[TreeNode],
    ) -> impl Future<Output = Result<MenuVersion, RepositoryError>> + Send;
}

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct MenuVersionRow {
    id: i32,
    shop: String,
    version_name: String,
    menu_json: serde_json::Value,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<MenuVersionRow> for MenuVersion {
    type Error = RepositoryError;

    fn try_from(row: MenuVersionRow) -> Result<Self, Self::Error> {
        let menu = serde_json::from_value(row.menu_json).map_err(|e| {
            RepositoryError::DataCorruption(format!("menu version {}: invalid menu json: {e}", row.id))
        })?;

        Ok(Self {
            id: MenuVersionId::new(row.id),
            shop: row.shop,
            version_name: row.version_name,
            menu,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MenuVersionSummaryRow {
    id: i32,
    version_name: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<MenuVersionSummaryRow> for MenuVersionSummary {
    fn from(row: MenuVersionSummaryRow) -> Self {
        Self {
            id: MenuVersionId::new(row.id),
            version_name: row.version_name,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

const VERSION_COLUMNS: &str = "id, shop, version_name, menu_json, is_active, created_at";

// =============================================================================
// Repository
// =============================================================================

/// `PostgreSQL` menu version store.
pub struct MenuVersionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MenuVersionRepository<'a> {
    /// Create a new menu version repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

fn save_failed(e: sqlx::Error) -> RepositoryError {
    RepositoryError::SaveFailed(e.to_string())
}

impl MenuVersionStore for MenuVersionRepository<'_> {
    #[instrument(skip(self))]
    async fn list(&self, shop: &str) -> Result<Vec<MenuVersionSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, MenuVersionSummaryRow>(
            r"
            SELECT id, version_name, is_active, created_at
            FROM admin.collection_menu_version
            WHERE shop = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(shop)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self), fields(version_id = %id))]
    async fn get(
        &self,
        shop: &str,
        id: MenuVersionId,
    ) -> Result<Option<MenuVersion>, RepositoryError> {
        let row = sqlx::query_as::<_, MenuVersionRow>(&format!(
            "SELECT {VERSION_COLUMNS} FROM admin.collection_menu_version WHERE shop = $1 AND id = $2"
        ))
        .bind(shop)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    #[instrument(skip(self))]
    async fn active_or_latest(&self, shop: &str) -> Result<Option<MenuVersion>, RepositoryError> {
        let row = sqlx::query_as::<_, MenuVersionRow>(&format!(
            r"
            SELECT {VERSION_COLUMNS}
            FROM admin.collection_menu_version
            WHERE shop = $1
            ORDER BY is_active DESC, created_at DESC, id DESC
            LIMIT 1
            "
        ))
        .bind(shop)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Runs in one transaction: take the per-shop advisory lock, clear the
    /// active flag, insert the new active row. Concurrent saves for one shop
    /// queue on the lock, so the last committer ends up active.
    #[instrument(skip(self, menu), fields(nodes = menu.len()))]
    async fn create_active(
        &self,
        shop: &str,
        version_name: &str,
        menu: &[TreeNode],
    ) -> Result<MenuVersion, RepositoryError> {
        let menu_json = serde_json::to_value(menu)
            .map_err(|e| RepositoryError::SaveFailed(format!("menu not serializable: {e}")))?;

        let mut tx = self.pool.begin().await.map_err(save_failed)?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(shop)
            .execute(&mut *tx)
            .await
            .map_err(save_failed)?;

        sqlx::query(
            r"
            UPDATE admin.collection_menu_version
            SET is_active = FALSE
            WHERE shop = $1 AND is_active
            ",
        )
        .bind(shop)
        .execute(&mut *tx)
        .await
        .map_err(save_failed)?;

        let row = sqlx::query_as::<_, MenuVersionRow>(&format!(
            r"
            INSERT INTO admin.collection_menu_version (shop, version_name, menu_json, is_active)
            VALUES ($1, $2, $3, TRUE)
            RETURNING {VERSION_COLUMNS}
            "
        ))
        .bind(shop)
        .bind(version_name)
        .bind(&menu_json)
        .fetch_one(&mut *tx)
        .await
        .map_err(save_failed)?;

        tx.commit().await.map_err(save_failed)?;

        tracing::info!(shop, version_name, "menu version saved");
        row.try_into()
    }
}

// =============================================================================
// In-memory store
// =============================================================================

/// In-process menu version store with the same guarantees as the
/// `PostgreSQL` one. Used by tests and tooling that run without a database.
#[derive(Debug, Default)]
pub struct MemoryMenuVersionStore {
    rows: Mutex<Vec<MenuVersion>>,
    fail_saves: AtomicBool,
}

impl MemoryMenuVersionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `create_active` fail without touching storage.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of every stored row, oldest first.
    pub async fn all(&self) -> Vec<MenuVersion> {
        self.rows.lock().await.clone()
    }
}

impl MenuVersionStore for MemoryMenuVersionStore {
    async fn list(&self, shop: &str) -> Result<Vec<MenuVersionSummary>, RepositoryError> {
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .rev()
            .filter(|v| v.shop == shop)
            .map(MenuVersionSummary::from)
            .collect())
    }

    async fn get(
        &self,
        shop: &str,
        id: MenuVersionId,
    ) -> Result<Option<MenuVersion>, RepositoryError> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().find(|v| v.shop == shop && v.id == id).cloned())
    }

    async fn active_or_latest(&self, shop: &str) -> Result<Option<MenuVersion>, RepositoryError> {
        let rows = self.rows.lock().await;
        let active = rows.iter().find(|v| v.shop == shop && v.is_active);
        let latest = rows.iter().rev().find(|v| v.shop == shop);
        Ok(active.or(latest).cloned())
    }

    async fn create_active(
        &self,
        shop: &str,
        version_name: &str,
        menu: &[TreeNode],
    ) -> Result<MenuVersion, RepositoryError> {
        let mut rows = self.rows.lock().await;

        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(RepositoryError::SaveFailed("store unavailable".to_owned()));
        }

        let next_id = i32::try_from(rows.len() + 1)
            .map_err(|_| RepositoryError::SaveFailed("id space exhausted".to_owned()))?;

        for row in rows.iter_mut().filter(|v| v.shop == shop) {
            row.is_active = false;
        }

        let version = MenuVersion {
            id: MenuVersionId::new(next_id),
            shop: shop.to_owned(),
            version_name: version_name.to_owned(),
            menu: menu.to_vec(),
            is_active: true,
            created_at: Utc::now(),
        };
        rows.push(version.clone());
        Ok(version)
    }
}
