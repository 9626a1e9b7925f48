//! Integration tests for the PostgreSQL account adapter
//!
//! These tests start a PostgreSQL container and need a running Docker daemon:
//!
//! ```text
//! cargo test -p infra_db -- --ignored
//! ```

use core_kernel::{AccountId, HealthCheckable, PortError};
use domain_account::{AccountPort, AccountService};
use infra_db::{DatabaseError, PostgresAccountAdapter};
use std::sync::Arc;
use test_utils::{
    assert_addresses_match, beach_address, create_isolated_test_database, food_forest_address,
    po_box_address, AccountBuilder, TestDatabase,
};

/// Starts a fresh database; keep the returned handle alive for the whole test
async fn setup() -> (TestDatabase, PostgresAccountAdapter) {
    let db = create_isolated_test_database()
        .await
        .expect("Failed to create test database");
    let adapter = PostgresAccountAdapter::new(db.pool().clone());
    (db, adapter)
}

// ============================================================================
// Save
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_insert_assigns_identities_and_timestamps() {
    let (_db, adapter) = setup().await;
    let account = AccountBuilder::new()
        .with_addresses(vec![food_forest_address(), beach_address()])
        .build();

    let saved = adapter.save(&account).await.unwrap();

    assert!(saved.id.is_some());
    assert!(saved.created_at.is_some());
    assert!(saved.updated_at.is_some());
    assert_eq!(saved.addresses.len(), 2);
    assert!(saved.addresses.iter().all(|a| a.id.is_some()));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_keeps_owned_address_ids_and_deletes_orphans() {
    let (_db, adapter) = setup().await;
    let account = AccountBuilder::new()
        .with_addresses(vec![food_forest_address(), beach_address()])
        .build();
    let saved = adapter.save(&account).await.unwrap();

    let mut kept = saved.addresses[0].clone();
    kept.line1 = "1001 New Lane".to_string();
    let mut changed = saved.clone();
    changed.replace_addresses(vec![kept.clone(), po_box_address()]);

    let updated = adapter.save(&changed).await.unwrap();

    assert_eq!(updated.id, saved.id);
    assert_eq!(updated.created_at, saved.created_at);
    let reloaded = adapter.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(reloaded.addresses.len(), 2);
    let moved = reloaded.addresses.iter().find(|a| a.id == kept.id).unwrap();
    assert_eq!(moved.line1, "1001 New Lane");
    assert!(reloaded.addresses.iter().all(|a| a.id != saved.addresses[1].id));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_with_no_addresses_clears_rows() {
    let (_db, adapter) = setup().await;
    let saved = adapter.save(&AccountBuilder::new().build()).await.unwrap();

    let mut cleared = saved.clone();
    cleared.clear_addresses();
    adapter.save(&cleared).await.unwrap();

    let reloaded = adapter.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();
    assert!(reloaded.addresses.is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_email_is_a_conflict() {
    let (_db, adapter) = setup().await;
    let first = adapter.save(&AccountBuilder::new().build()).await.unwrap();

    let clash = AccountBuilder::new().with_email(&first.email_address).build();
    let result = adapter.save(&clash).await;

    assert!(matches!(result, Err(PortError::Conflict { .. })));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_ref_id_is_a_conflict() {
    let (_db, adapter) = setup().await;
    let first = adapter.save(&AccountBuilder::new().build()).await.unwrap();

    let clash = AccountBuilder::new()
        .with_account_ref_id(first.account_ref_id.as_deref().unwrap())
        .build();
    let result = adapter.save(&clash).await;

    assert!(result.unwrap_err().is_conflict());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_failed_insert_leaves_no_rows() {
    let (_db, adapter) = setup().await;
    let first = adapter.save(&AccountBuilder::new().build()).await.unwrap();
    let before = adapter.find_all().await.unwrap().len();

    let clash = AccountBuilder::new().with_email(&first.email_address).build();
    let _ = adapter.save(&clash).await;

    assert_eq!(adapter.find_all().await.unwrap().len(), before);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_save_with_unknown_id_inserts() {
    let (_db, adapter) = setup().await;
    let ghost = AccountBuilder::new().build().with_id(AccountId::new(i64::MAX));

    let saved = adapter.save(&ghost).await.unwrap();

    assert_ne!(saved.id, Some(AccountId::new(i64::MAX)));
}

// ============================================================================
// Queries and delete
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_by_account_ref_id_round_trip() {
    let (_db, adapter) = setup().await;
    let saved = adapter.save(&AccountBuilder::new().build()).await.unwrap();

    let found = adapter
        .find_by_account_ref_id(saved.account_ref_id.as_deref().unwrap())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found, saved);
    assert_addresses_match(&found.addresses, &saved.addresses);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_cascades_to_addresses() {
    let (db, adapter) = setup().await;
    let saved = adapter.save(&AccountBuilder::new().build()).await.unwrap();
    let id = saved.id.unwrap();

    adapter.delete_by_id(id).await.unwrap();

    assert!(adapter.find_by_id(id).await.unwrap().is_none());
    let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM address WHERE account_id = $1")
        .bind(id.value())
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(orphans, 0);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_unknown_id_is_ok() {
    let (_db, adapter) = setup().await;
    adapter.delete_by_id(AccountId::new(i64::MAX - 1)).await.unwrap();
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_repository_update_of_missing_row_is_account_missing() {
    let (_db, adapter) = setup().await;
    let input = infra_db::repositories::NewAccount {
        account_ref_id: "REF-MISSING".to_string(),
        first_name: "Duke".to_string(),
        last_name: "Missing".to_string(),
        email_address: "missing@enjoy.com".to_string(),
        addresses: vec![],
    };

    let result = adapter.repository().update(i64::MAX - 2, &input).await;

    assert!(matches!(result, Err(DatabaseError::AccountMissing(id)) if id == i64::MAX - 2));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_health_check_against_live_database() {
    let (_db, adapter) = setup().await;

    assert!(adapter.health_check().await.is_operational());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_service_scenario_against_postgres() {
    let (_db, adapter) = setup().await;
    let service = AccountService::new(Arc::new(adapter));
    let created = service
        .create(AccountBuilder::new().without_account_ref_id().build())
        .await
        .unwrap();
    let id = created.id.unwrap();

    let mut moved = created.addresses[0].clone();
    moved.line1 = "1001 New Lane".to_string();
    let incoming = AccountBuilder::new()
        .with_email(&created.email_address)
        .with_addresses(vec![moved])
        .build();
    service.update(id, incoming).await.unwrap();

    let addresses = service.find_all_addresses_for_account(id).await.unwrap();
    assert_eq!(addresses.len(), 1);
    assert_eq!(addresses[0].id, created.addresses[0].id);
    assert_eq!(addresses[0].line1, "1001 New Lane");

    service.delete(id).await;
    assert!(service.find_by_id(id).await.unwrap_err().is_not_found());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_all_lists_accounts_with_their_addresses() {
    let (db, adapter) = setup().await;
    db.clear_data().await.unwrap();
    adapter
        .save(&AccountBuilder::new().with_addresses(vec![food_forest_address(), beach_address()]).build())
        .await
        .unwrap();
    adapter.save(&AccountBuilder::new().without_addresses().build()).await.unwrap();

    let all = adapter.find_all().await.unwrap();

    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, Some(AccountId::new(1)));
    assert_eq!(all[0].addresses.len(), 2);
    assert!(all[1].addresses.is_empty());
}
