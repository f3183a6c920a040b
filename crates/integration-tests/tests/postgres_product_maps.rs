//! Product mapping storage against `PostgreSQL`.
//!
//! Ignored by default; see the crate docs for how to run them.

#![allow(clippy::unwrap_used)]

use chrono::Utc;
use magbridge_admin::db::{ProductMapRepository, RepositoryError};
use magbridge_admin::services::product_sync::push_entries;
use magbridge_integration_tests::test_pool;

/// Magento ids no other run has used.
fn unique_product_id() -> i64 {
    Utc::now().timestamp_nanos_opt().unwrap_or_default()
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn upsert_refreshes_the_mapping_of_a_product() {
    let pool = test_pool().await;
    let repo = ProductMapRepository::new(&pool);
    let magento_id = unique_product_id();
    let shopify_id = format!("gid://shopify/Product/{magento_id}");

    let first = repo
        .upsert(magento_id, &shopify_id, Some("CS-10"), "Combi steamer")
        .await
        .unwrap();
    let second = repo
        .upsert(magento_id, &shopify_id, None, "Combi steamer XL")
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.sku, None);
    assert!(second.updated_at >= first.updated_at);

    let stored = repo.get_by_product(magento_id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Combi steamer XL");

    let entries = push_entries(repo.list_all().await.unwrap());
    assert!(entries.iter().any(|e| e.magento_product_id == magento_id));
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn one_shopify_product_cannot_back_two_magento_products() {
    let pool = test_pool().await;
    let repo = ProductMapRepository::new(&pool);
    let magento_id = unique_product_id();
    let shopify_id = format!("gid://shopify/Product/{magento_id}");

    repo.upsert(magento_id, &shopify_id, None, "Tray").await.unwrap();
    let err = repo
        .upsert(magento_id + 1, &shopify_id, None, "Tray copy")
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));
}
