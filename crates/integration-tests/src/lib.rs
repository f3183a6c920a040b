//! Integration tests for the Magento bridge.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process tests (no services needed)
//! cargo test -p magbridge-integration-tests
//!
//! # Also run the PostgreSQL tests against a scratch database
//! TEST_DATABASE_URL=postgres://localhost/magbridge_test \
//!     cargo test -p magbridge-integration-tests -- --include-ignored
//! ```
//!
//! The `PostgreSQL` tests run the admin migrations and write to
//! `admin.collection_menu_version` and `admin.product_map_magento` under
//! shop names and product ids unique to each run.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::{DateTime, Utc};
use magbridge_core::TreeNode;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Shop used by in-process tests.
pub const SHOP: &str = "example.myshopify.com";

/// Parse a tree from its JSON form.
#[must_use]
pub fn tree(value: serde_json::Value) -> Vec<TreeNode> {
    serde_json::from_value(value).expect("valid tree JSON")
}

/// Parse an RFC 3339 timestamp.
#[must_use]
pub fn at(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

/// Connect to `TEST_DATABASE_URL` and bring the schema up to date.
///
/// # Panics
///
/// Panics when the variable is unset or the database is unreachable.
pub async fn test_pool() -> PgPool {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(16)
        .connect(&url)
        .await
        .expect("connect to test database");
    sqlx::migrate!("../admin/migrations")
        .run(&pool)
        .await
        .expect("run admin migrations");
    pool
}

/// A shop name no other run has used.
#[must_use]
pub fn unique_shop(prefix: &str) -> String {
    format!(
        "{prefix}-{}.myshopify.com",
        Utc::now().timestamp_nanos_opt().unwrap_or_default()
    )
}
