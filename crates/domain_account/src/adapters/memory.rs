//! In-Memory Account Adapter
//!
//! A process-local implementation of [`AccountPort`] backed by a `BTreeMap`.
//! It follows the same storage contract as the PostgreSQL adapter: ids come
//! from per-table sequences starting at 1, `account_ref_id` and
//! `email_address` are unique, and addresses missing from a saved set are
//! removed.
//!
//! Every write holds the store's write lock for its whole duration, which
//! makes each call atomic with respect to every other call.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::{AccountId, AddressId, DomainPort, HealthCheckResult, HealthCheckable, PortError};

use crate::account::Account;
use crate::ports::AccountPort;

const ADAPTER_ID: &str = "in-memory-account-adapter";

/// In-memory storage for account aggregates
#[derive(Debug, Default)]
pub struct InMemoryAccountAdapter {
    accounts: RwLock<BTreeMap<AccountId, Account>>,
    account_sequence: AtomicI64,
    address_sequence: AtomicI64,
}

impl InMemoryAccountAdapter {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    /// Returns true if nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }

    fn next_account_id(&self) -> AccountId {
        AccountId::new(self.account_sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn next_address_id(&self) -> AddressId {
        AddressId::new(self.address_sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// Rejects a save that would duplicate another account's unique keys
fn check_unique_keys(
    accounts: &BTreeMap<AccountId, Account>,
    candidate: &Account,
    own_id: Option<AccountId>,
) -> Result<(), PortError> {
    for (id, other) in accounts {
        if Some(*id) == own_id {
            continue;
        }
        if other.account_ref_id == candidate.account_ref_id {
            return Err(PortError::conflict(format!(
                "account_ref_id '{}' already exists",
                candidate.account_ref_id.as_deref().unwrap_or_default()
            )));
        }
        if other.email_address == candidate.email_address {
            return Err(PortError::conflict(format!(
                "email_address '{}' already exists",
                candidate.email_address
            )));
        }
    }
    Ok(())
}

impl DomainPort for InMemoryAccountAdapter {}

#[async_trait]
impl HealthCheckable for InMemoryAccountAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::healthy(ADAPTER_ID, 0)
    }
}

#[async_trait]
impl AccountPort for InMemoryAccountAdapter {
    async fn save(&self, account: &Account) -> Result<Account, PortError> {
        if account.account_ref_id.is_none() {
            return Err(PortError::validation_field(
                "account_ref_id must be set before saving",
                "account_ref_id",
            ));
        }

        let mut accounts = self.accounts.write().await;

        let existing = account.id.and_then(|id| accounts.get(&id)).cloned();

        let mut stored = account.clone();
        if let Some(existing) = &existing {
            // The natural key never changes once stored
            stored.account_ref_id = existing.account_ref_id.clone();
        }
        check_unique_keys(&accounts, &stored, existing.as_ref().and_then(|e| e.id))?;

        let now = Utc::now();

        // Address ids survive only when they belonged to this account before
        let mut owned: HashSet<AddressId> = existing
            .as_ref()
            .map(|e| e.addresses.iter().filter_map(|a| a.id).collect())
            .unwrap_or_default();
        for address in &mut stored.addresses {
            match address.id {
                Some(id) if owned.remove(&id) => {}
                _ => address.id = Some(self.next_address_id()),
            }
        }

        match existing {
            Some(existing) => {
                debug!(account_id = ?existing.id, "Updating stored account");
                stored.id = existing.id;
                stored.created_at = existing.created_at;
            }
            None => {
                let id = self.next_account_id();
                debug!(account_id = %id, "Inserting account");
                stored.id = Some(id);
                stored.created_at = Some(now);
            }
        }
        stored.updated_at = Some(now);

        if let Some(id) = stored.id {
            accounts.insert(id, stored.clone());
        }
        Ok(stored)
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, PortError> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn find_by_account_ref_id(&self, account_ref_id: &str) -> Result<Option<Account>, PortError> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|a| a.account_ref_id.as_deref() == Some(account_ref_id))
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Account>, PortError> {
        Ok(self.accounts.read().await.values().cloned().collect())
    }

    async fn delete_by_id(&self, id: AccountId) -> Result<(), PortError> {
        if self.accounts.write().await.remove(&id).is_none() {
            debug!(account_id = %id, "Delete of unknown account ignored");
        }
        Ok(())
    }
}
