//! Account aggregate manager
//!
//! [`AccountService`] orchestrates the account lifecycle over an
//! [`AccountPort`]:
//!
//! ```text
//! non-existent -> persisted -> (updated)* -> deleted
//! ```
//!
//! The service holds no state of its own and takes no locks. Each operation
//! makes at most one write to the port, so a call either commits completely
//! or not at all. Concurrent updates to the same account are last-writer-wins.

use std::sync::Arc;

use tracing::{debug, error, info, instrument};

use core_kernel::{AccountId, HealthCheckResult};

use crate::account::Account;
use crate::address::Address;
use crate::error::AccountError;
use crate::ports::AccountPort;
use crate::validation::AccountValidator;

/// Application service for account operations
#[derive(Clone)]
pub struct AccountService {
    port: Arc<dyn AccountPort>,
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService").finish_non_exhaustive()
    }
}

impl AccountService {
    /// Creates a service over the given repository port
    pub fn new(port: Arc<dyn AccountPort>) -> Self {
        Self { port }
    }

    /// Creates an account together with its addresses
    ///
    /// The account must hold at least one address. A missing or blank
    /// `account_ref_id` is replaced by a generated one; a supplied one is kept.
    /// Identity and timestamps on the input are ignored.
    ///
    /// # Errors
    ///
    /// - `MissingAddress` when the address set is empty
    /// - `InvalidEmail` when the email address violates a constraint
    /// - `ValidationFailed` for any other violated constraint
    /// - `DuplicateKey` when the natural key or email already exists
    #[instrument(skip(self, account), fields(email = %account.email_address))]
    pub async fn create(&self, mut account: Account) -> Result<Account, AccountError> {
        debug!("Creating account");

        if account.addresses.is_empty() {
            return Err(AccountError::MissingAddress);
        }

        account.clear_identity();
        account.ensure_account_ref_id();

        let report = AccountValidator::report(&account);
        if report.has_violations() {
            debug!(violations = ?report.messages(), "Account rejected");
            return Err(AccountError::from_report(&report));
        }

        let saved = self.port.save(&account).await?;
        info!(
            account_id = ?saved.id,
            account_ref_id = ?saved.account_ref_id,
            addresses = saved.addresses.len(),
            "Created account"
        );
        Ok(saved)
    }

    /// Updates names, email and addresses of a stored account
    ///
    /// An empty incoming address set clears the stored one. Otherwise the
    /// stored set is replaced wholesale and addresses no longer present are
    /// deleted. The natural key is never changed.
    ///
    /// # Errors
    ///
    /// - `NotFound` when no account exists at `id`
    /// - `DuplicateKey` when the new email belongs to another account
    #[instrument(skip(self, incoming), fields(account_id = %id))]
    pub async fn update(&self, id: AccountId, incoming: Account) -> Result<Account, AccountError> {
        debug!("Updating account");

        let mut stored = self
            .port
            .find_by_id(id)
            .await?
            .ok_or_else(|| AccountError::not_found(id))?;

        stored.apply_update(incoming);

        let saved = self.port.save(&stored).await?;
        info!(addresses = saved.addresses.len(), "Updated account");
        Ok(saved)
    }

    /// Deletes an account and its addresses
    ///
    /// Unknown ids are ignored. Storage failures are logged and not returned.
    #[instrument(skip(self), fields(account_id = %id))]
    pub async fn delete(&self, id: AccountId) {
        debug!("Deleting account");

        match self.port.delete_by_id(id).await {
            Ok(()) => info!("Deleted account"),
            Err(e) => error!(error = %e, "Failed to delete account"),
        }
    }

    /// Retrieves an account by storage id
    #[instrument(skip(self), fields(account_id = %id))]
    pub async fn find_by_id(&self, id: AccountId) -> Result<Account, AccountError> {
        debug!("Fetching account by ID");
        self.port
            .find_by_id(id)
            .await?
            .ok_or_else(|| AccountError::not_found(id))
    }

    /// Retrieves an account by its natural key
    #[instrument(skip(self))]
    pub async fn find_by_account_ref_id(&self, account_ref_id: &str) -> Result<Account, AccountError> {
        debug!("Fetching account by reference ID");
        self.port
            .find_by_account_ref_id(account_ref_id)
            .await?
            .ok_or_else(|| AccountError::not_found(account_ref_id))
    }

    /// Retrieves every account
    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<Account>, AccountError> {
        debug!("Fetching all accounts");
        Ok(self.port.find_all().await?)
    }

    /// Retrieves the address set of an account
    #[instrument(skip(self), fields(account_id = %id))]
    pub async fn find_all_addresses_for_account(&self, id: AccountId) -> Result<Vec<Address>, AccountError> {
        let account = self.find_by_id(id).await?;
        Ok(account.addresses)
    }

    /// Reports the health of the underlying storage
    pub async fn health(&self) -> HealthCheckResult {
        self.port.health_check().await
    }
}
