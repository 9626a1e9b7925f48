//! Account Domain Ports
//!
//! This module defines the repository port for the account domain, enabling
//! swappable storage implementations (PostgreSQL, in-memory, mock).
//!
//! # Architecture
//!
//! The `AccountPort` trait is the narrow persistence interface the
//! [`AccountService`](crate::service::AccountService) consumes:
//!
//! - **PostgreSQL Adapter**: `infra_db::adapters::PostgresAccountAdapter`
//! - **In-Memory Adapter**: [`InMemoryAccountAdapter`](crate::adapters::InMemoryAccountAdapter)
//! - **Mock Adapter**: [`mock::MockAccountPort`], records calls and injects failures
//!
//! # Contract
//!
//! - `save` inserts when the account has no id (or its id is unknown) and
//!   updates otherwise. Addresses cascade: new ones are inserted, kept ones
//!   updated, and addresses missing from the set are deleted.
//! - Storage assigns account and address ids and maintains the timestamps.
//! - A unique-key violation on `account_ref_id` or `email_address` is
//!   reported as `PortError::Conflict`.
//! - Each call is one transaction: either the account and all its addresses
//!   are written, or nothing is.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_account::{AccountPort, AccountService};
//! use std::sync::Arc;
//!
//! let port: Arc<dyn AccountPort> = Arc::new(PostgresAccountAdapter::new(pool));
//! let service = AccountService::new(port);
//! ```

use async_trait::async_trait;

use core_kernel::{AccountId, DomainPort, HealthCheckable, PortError};

use crate::account::Account;

/// The repository port for account aggregates
#[async_trait]
pub trait AccountPort: DomainPort + HealthCheckable {
    /// Inserts or updates an account, cascading to its addresses
    ///
    /// # Returns
    ///
    /// The stored account with identities and timestamps assigned
    async fn save(&self, account: &Account) -> Result<Account, PortError>;

    /// Retrieves an account by storage id
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, PortError>;

    /// Retrieves an account by its natural key
    async fn find_by_account_ref_id(&self, account_ref_id: &str) -> Result<Option<Account>, PortError>;

    /// Retrieves every account
    async fn find_all(&self) -> Result<Vec<Account>, PortError>;

    /// Deletes an account and its addresses; unknown ids are not an error
    async fn delete_by_id(&self, id: AccountId) -> Result<(), PortError>;
}

/// Mock implementation of AccountPort for testing
///
/// Wraps the in-memory adapter, records every call in order, and can be
/// primed to fail a given operation.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::RwLock;

    use core_kernel::HealthCheckResult;

    use crate::adapters::InMemoryAccountAdapter;

    /// Port operations, used to target injected failures
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum PortOperation {
        Save,
        FindById,
        FindByAccountRefId,
        FindAll,
        DeleteById,
    }

    /// A recorded port call with its arguments
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum PortCall {
        Save(Option<AccountId>),
        FindById(AccountId),
        FindByAccountRefId(String),
        FindAll,
        DeleteById(AccountId),
    }

    impl PortCall {
        /// Returns the operation this call invoked
        pub fn operation(&self) -> PortOperation {
            match self {
                PortCall::Save(_) => PortOperation::Save,
                PortCall::FindById(_) => PortOperation::FindById,
                PortCall::FindByAccountRefId(_) => PortOperation::FindByAccountRefId,
                PortCall::FindAll => PortOperation::FindAll,
                PortCall::DeleteById(_) => PortOperation::DeleteById,
            }
        }
    }

    /// In-memory mock implementation of AccountPort
    #[derive(Debug, Default)]
    pub struct MockAccountPort {
        inner: InMemoryAccountAdapter,
        calls: RwLock<Vec<PortCall>>,
        failures: RwLock<HashMap<PortOperation, fn() -> PortError>>,
        outage: RwLock<Option<String>>,
    }

    impl MockAccountPort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with accounts, returning them as stored
        pub async fn with_accounts(accounts: Vec<Account>) -> (Self, Vec<Account>) {
            let port = Self::new();
            let mut stored = Vec::with_capacity(accounts.len());
            for account in accounts {
                if let Ok(saved) = port.inner.save(&account).await {
                    stored.push(saved);
                }
            }
            (port, stored)
        }

        /// Makes every later call of `operation` fail with the produced error
        pub async fn fail_on(&self, operation: PortOperation, error: fn() -> PortError) {
            self.failures.write().await.insert(operation, error);
        }

        /// Makes the health check report the adapter as unhealthy
        pub async fn set_unhealthy(&self, message: impl Into<String>) {
            *self.outage.write().await = Some(message.into());
        }

        /// Returns the calls made so far, in order
        pub async fn calls(&self) -> Vec<PortCall> {
            self.calls.read().await.clone()
        }

        /// Counts the calls made to one operation
        pub async fn call_count(&self, operation: PortOperation) -> usize {
            self.calls
                .read()
                .await
                .iter()
                .filter(|call| call.operation() == operation)
                .count()
        }

        async fn record(&self, call: PortCall) -> Result<(), PortError> {
            let operation = call.operation();
            self.calls.write().await.push(call);
            match self.failures.read().await.get(&operation) {
                Some(make_error) => Err(make_error()),
                None => Ok(()),
            }
        }
    }

    impl DomainPort for MockAccountPort {}

    #[async_trait]
    impl HealthCheckable for MockAccountPort {
        async fn health_check(&self) -> HealthCheckResult {
            match self.outage.read().await.as_deref() {
                Some(message) => HealthCheckResult::unhealthy("mock-account-port", 0, message),
                None => HealthCheckResult::healthy("mock-account-port", 0),
            }
        }
    }

    #[async_trait]
    impl AccountPort for MockAccountPort {
        async fn save(&self, account: &Account) -> Result<Account, PortError> {
            self.record(PortCall::Save(account.id)).await?;
            self.inner.save(account).await
        }

        async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, PortError> {
            self.record(PortCall::FindById(id)).await?;
            self.inner.find_by_id(id).await
        }

        async fn find_by_account_ref_id(&self, account_ref_id: &str) -> Result<Option<Account>, PortError> {
            self.record(PortCall::FindByAccountRefId(account_ref_id.to_string())).await?;
            self.inner.find_by_account_ref_id(account_ref_id).await
        }

        async fn find_all(&self) -> Result<Vec<Account>, PortError> {
            self.record(PortCall::FindAll).await?;
            self.inner.find_all().await
        }

        async fn delete_by_id(&self, id: AccountId) -> Result<(), PortError> {
            self.record(PortCall::DeleteById(id)).await?;
            self.inner.delete_by_id(id).await
        }
    }
}
