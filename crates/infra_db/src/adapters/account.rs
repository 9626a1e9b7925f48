//! PostgreSQL Account Adapter
//!
//! This module provides the database adapter for the account domain,
//! implementing the `AccountPort` trait using PostgreSQL via the
//! `AccountRepository`.
//!
//! # Overview
//!
//! The `PostgresAccountAdapter` serves as the bridge between the domain layer's
//! port interface and the database layer. It:
//!
//! - Converts domain accounts into repository inputs and rows back into accounts
//! - Chooses between insert and update for `save`
//! - Translates database errors into port errors
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresAccountAdapter;
//! use domain_account::{AccountPort, AccountService};
//! use std::sync::Arc;
//!
//! let port: Arc<dyn AccountPort> = Arc::new(PostgresAccountAdapter::new(pool));
//! let service = AccountService::new(port);
//! ```

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{AccountId, AddressId, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_account::{Account, AccountPort, Address};

use crate::error::DatabaseError;
use crate::repositories::account::{AccountRecord, AccountRepository, AddressRow, NewAccount, NewAddress};

const ADAPTER_ID: &str = "postgres-account-adapter";

/// PostgreSQL-backed implementation of the AccountPort trait
///
/// # Error Handling
///
/// Database errors are translated to `PortError` variants:
/// - `DatabaseError::NotFound` and `AccountMissing` -> `PortError::NotFound`
/// - `DatabaseError::DuplicateEntry` -> `PortError::Conflict`
/// - Connection failures and pool exhaustion -> `PortError::Connection`
/// - Other errors -> `PortError::Internal`
#[derive(Debug, Clone)]
pub struct PostgresAccountAdapter {
    repository: AccountRepository,
    pool: PgPool,
}

impl PostgresAccountAdapter {
    /// Creates a new PostgreSQL account adapter
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: AccountRepository::new(pool.clone()),
            pool,
        }
    }

    /// Returns a reference to the underlying repository
    pub fn repository(&self) -> &AccountRepository {
        &self.repository
    }
}

impl DomainPort for PostgresAccountAdapter {}

#[async_trait]
impl HealthCheckable for PostgresAccountAdapter {
    /// Checks database connectivity with a `SELECT 1`
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult::healthy(ADAPTER_ID, latency_ms),
            Err(e) => HealthCheckResult::unhealthy(ADAPTER_ID, latency_ms, format!("Database error: {}", e)),
        }
    }
}

#[async_trait]
impl AccountPort for PostgresAccountAdapter {
    #[instrument(skip(self, account), fields(account_id = ?account.id))]
    async fn save(&self, account: &Account) -> Result<Account, PortError> {
        let input = account_to_input(account)?;

        let record = match account.id {
            Some(id) => match self.repository.update(id.value(), &input).await {
                Err(e) if inserts_after_failed_update(&e) => {
                    debug!("Account row missing, inserting");
                    self.repository.insert(&input).await
                }
                other => other,
            },
            None => {
                debug!("Inserting account");
                self.repository.insert(&input).await
            }
        }
        .map_err(db_to_port_error)?;

        Ok(record_to_account(record))
    }

    #[instrument(skip(self), fields(account_id = %id))]
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, PortError> {
        debug!("Fetching account by ID");
        let record = self
            .repository
            .get_by_id(id.value())
            .await
            .map_err(db_to_port_error)?;

        Ok(record.map(record_to_account))
    }

    #[instrument(skip(self))]
    async fn find_by_account_ref_id(&self, account_ref_id: &str) -> Result<Option<Account>, PortError> {
        debug!("Fetching account by reference ID");
        let record = self
            .repository
            .get_by_account_ref_id(account_ref_id)
            .await
            .map_err(db_to_port_error)?;

        Ok(record.map(record_to_account))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Account>, PortError> {
        debug!("Fetching all accounts");
        let records = self.repository.list().await.map_err(db_to_port_error)?;

        Ok(records.into_iter().map(record_to_account).collect())
    }

    #[instrument(skip(self), fields(account_id = %id))]
    async fn delete_by_id(&self, id: AccountId) -> Result<(), PortError> {
        let removed = self.repository.delete(id.value()).await.map_err(db_to_port_error)?;
        debug!(removed, "Deleted account rows");
        Ok(())
    }
}

/// Only a missing account row turns an update into an insert; any other
/// miss inside the update transaction is reported as-is
fn inserts_after_failed_update(error: &DatabaseError) -> bool {
    matches!(error, DatabaseError::AccountMissing(_))
}

/// Converts database errors to port errors
fn db_to_port_error(e: DatabaseError) -> PortError {
    match e {
        DatabaseError::NotFound(message) => PortError::not_found("Account", message),
        DatabaseError::AccountMissing(id) => PortError::not_found("Account", AccountId::new(id)),
        DatabaseError::DuplicateEntry(message) => PortError::conflict(message),
        DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted => {
            PortError::connection(e.to_string())
        }
        _ => PortError::internal(e.to_string()),
    }
}

fn account_to_input(account: &Account) -> Result<NewAccount, PortError> {
    let account_ref_id = account.account_ref_id.clone().ok_or_else(|| {
        PortError::validation_field("account_ref_id must be set before saving", "account_ref_id")
    })?;

    Ok(NewAccount {
        account_ref_id,
        first_name: account.first_name.clone(),
        last_name: account.last_name.clone(),
        email_address: account.email_address.clone(),
        addresses: account.addresses.iter().map(address_to_input).collect(),
    })
}

fn address_to_input(address: &Address) -> NewAddress {
    NewAddress {
        id: address.id.map(|id| id.value()),
        street_address: address.line1.clone(),
        second_address: address.line2.clone(),
        city: address.city.clone(),
        state: address.state.clone(),
        province: address.province.clone(),
        postal_code: address.postal_code.clone(),
        country: address.country.clone(),
    }
}

fn record_to_account(record: AccountRecord) -> Account {
    let row = record.account;
    Account {
        id: Some(AccountId::new(row.id)),
        account_ref_id: Some(row.account_ref_id),
        first_name: row.first_name,
        last_name: row.last_name,
        email_address: row.email_address,
        addresses: record.addresses.into_iter().map(row_to_address).collect(),
        created_at: Some(row.created_dt),
        updated_at: Some(row.updated_dt),
    }
}

fn row_to_address(row: AddressRow) -> Address {
    Address {
        id: Some(AddressId::new(row.id)),
        line1: row.street_address,
        line2: row.second_address,
        city: row.city,
        state: row.state,
        province: row.province,
        postal_code: row.postal_code,
        country: row.country,
    }
}
