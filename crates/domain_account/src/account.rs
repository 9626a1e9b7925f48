//! Account aggregate
//!
//! An [`Account`] is the aggregate root: it exclusively owns its address set,
//! and every persistence operation on the account applies to the addresses
//! as well (cascade insert/update, orphan removal on replace, cascade delete).
//!
//! # Identity
//!
//! Two accounts are equal only when both have been persisted and carry the
//! same storage id. Unpersisted accounts are never equal to anything,
//! themselves included, so `Account` implements `PartialEq` but not `Eq`.
//!
//! # Natural key
//!
//! `account_ref_id` is a caller-meaningful unique key. Callers may supply it
//! on create; when absent the service assigns a generated one. Once set it
//! never changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::AccountId;

use crate::address::Address;

/// Maximum length of a generated natural key
pub const ACCOUNT_REF_ID_MAX_LEN: usize = 255;

/// A customer account with its owned addresses
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Account {
    /// Storage-assigned identity, `None` until first persisted
    pub id: Option<AccountId>,
    /// Natural key, unique across accounts
    #[validate(length(min = 6, max = 255, message = "Account reference ID must be between 6 and 255 characters"))]
    pub account_ref_id: Option<String>,
    #[validate(length(min = 2, max = 200, message = "First Name must be between 2 and 200 characters"))]
    pub first_name: String,
    #[validate(length(min = 2, max = 200, message = "Last Name must be between 2 and 200 characters"))]
    pub last_name: String,
    /// Globally unique contact address
    #[validate(
        email(message = "Invalid e-mail address."),
        length(min = 3, max = 200, message = "Email address must be between 3 and 200 characters"),
        custom(function = "crate::validation::validate_email_shape")
    )]
    pub email_address: String,
    /// Owned address set, unordered with unique membership
    pub addresses: Vec<Address>,
    /// Set by storage on first persist
    pub created_at: Option<DateTime<Utc>>,
    /// Set by storage on every persist
    pub updated_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Creates a new, unpersisted account
    ///
    /// Duplicate addresses are collapsed so the set keeps unique membership.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email_address: impl Into<String>,
        addresses: Vec<Address>,
    ) -> Self {
        let mut account = Self {
            id: None,
            account_ref_id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email_address: email_address.into(),
            addresses: Vec::with_capacity(addresses.len()),
            created_at: None,
            updated_at: None,
        };
        account.replace_addresses(addresses);
        account
    }

    /// Sets the natural key
    pub fn with_account_ref_id(mut self, account_ref_id: impl Into<String>) -> Self {
        self.account_ref_id = Some(account_ref_id.into());
        self
    }

    /// Sets the storage identity
    pub fn with_id(mut self, id: AccountId) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns true once storage has assigned an identity
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Returns the full name in "First Last" format
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Adds an address unless the set already holds the same member
    ///
    /// # Returns
    ///
    /// `true` if the address was inserted
    pub fn add_address(&mut self, address: Address) -> bool {
        if self.addresses.iter().any(|existing| existing.same_member(&address)) {
            return false;
        }
        self.addresses.push(address);
        true
    }

    /// Replaces the whole address set
    ///
    /// Addresses no longer present become orphans that storage deletes on the
    /// next save.
    pub fn replace_addresses(&mut self, addresses: Vec<Address>) {
        self.addresses.clear();
        for address in addresses {
            self.add_address(address);
        }
    }

    /// Empties the address set
    pub fn clear_addresses(&mut self) {
        self.addresses.clear();
    }

    /// Assigns a generated natural key when none (or a blank one) is present
    ///
    /// # Returns
    ///
    /// The natural key now held by the account
    pub fn ensure_account_ref_id(&mut self) -> &str {
        let needs_key = self
            .account_ref_id
            .as_deref()
            .map_or(true, |key| key.trim().is_empty());
        if needs_key {
            self.account_ref_id = Some(generate_account_ref_id());
        }
        self.account_ref_id.as_deref().unwrap_or_default()
    }

    /// Drops every storage-assigned value so the account saves as a new row
    pub fn clear_identity(&mut self) {
        self.id = None;
        self.created_at = None;
        self.updated_at = None;
        for address in &mut self.addresses {
            address.id = None;
        }
    }

    /// Applies an incoming update onto this (stored) account
    ///
    /// Copies the names and email address. An empty incoming address set
    /// clears the stored set; otherwise the stored set is replaced wholesale.
    /// Identity, natural key and timestamps are left untouched.
    pub fn apply_update(&mut self, incoming: Account) {
        self.first_name = incoming.first_name;
        self.last_name = incoming.last_name;
        self.email_address = incoming.email_address;

        if incoming.addresses.is_empty() {
            self.clear_addresses();
        } else {
            self.replace_addresses(incoming.addresses);
        }
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// Generates a natural key, truncated to the column limit
pub fn generate_account_ref_id() -> String {
    limit_to_length(Uuid::new_v4().to_string(), ACCOUNT_REF_ID_MAX_LEN)
}

fn limit_to_length(mut data: String, max_chars: usize) -> String {
    if let Some((byte_index, _)) = data.char_indices().nth(max_chars) {
        data.truncate(byte_index);
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::AddressId;

    fn address() -> Address {
        Address::new("100", "Food Forest City", "FL", "33000", "US")
    }

    fn minimal() -> Account {
        Account::new("Minimal", "CreateAccount", "dukefirst.last@enjoy.com", vec![address()])
    }

    #[test]
    fn test_unpersisted_accounts_are_never_equal() {
        let account = minimal();
        assert!(account != account.clone());
        #[allow(clippy::eq_op)]
        let self_equal = account == account;
        assert!(!self_equal);
    }

    #[test]
    fn test_persisted_accounts_compare_by_id() {
        let a = minimal().with_id(AccountId::new(1));
        let mut b = minimal().with_id(AccountId::new(1));
        b.first_name = "Different".to_string();
        assert_eq!(a, b);
        assert_ne!(a, minimal().with_id(AccountId::new(2)));
    }

    #[test]
    fn test_new_collapses_duplicate_addresses() {
        let account = Account::new("Duke", "Duke", "duke@duke.com", vec![address(), address()]);
        assert_eq!(account.addresses.len(), 1);
    }

    #[test]
    fn test_ensure_account_ref_id_generates_when_missing() {
        let mut account = minimal();
        let key = account.ensure_account_ref_id().to_string();
        assert_eq!(key.len(), 36);
        assert_eq!(account.account_ref_id.as_deref(), Some(key.as_str()));
    }

    #[test]
    fn test_ensure_account_ref_id_keeps_client_value() {
        let mut account = minimal().with_account_ref_id("CLIENT-0001");
        assert_eq!(account.ensure_account_ref_id(), "CLIENT-0001");
    }

    #[test]
    fn test_ensure_account_ref_id_replaces_blank() {
        let mut account = minimal().with_account_ref_id("   ");
        assert_ne!(account.ensure_account_ref_id(), "   ");
    }

    #[test]
    fn test_limit_to_length_counts_characters() {
        assert_eq!(limit_to_length("abcdef".to_string(), 4), "abcd");
        assert_eq!(limit_to_length("ééé".to_string(), 2), "éé");
        assert_eq!(limit_to_length("ab".to_string(), 255), "ab");
    }

    #[test]
    fn test_apply_update_with_empty_addresses_clears_set() {
        let mut stored = minimal().with_id(AccountId::new(1));
        let incoming = Account::new("New", "Name", "new@enjoy.com", vec![]);

        stored.apply_update(incoming);

        assert!(stored.addresses.is_empty());
        assert_eq!(stored.first_name, "New");
        assert_eq!(stored.email_address, "new@enjoy.com");
    }

    #[test]
    fn test_apply_update_replaces_addresses_wholesale() {
        let mut stored = minimal().with_id(AccountId::new(1));
        stored.addresses[0].id = Some(AddressId::new(100));

        let beach = Address::new("1 Beach Sunny Drive", "Beach Waves City", "FL", "33000", "US");
        let po_box = Address::new("100 Peaches and Fructose Way", "PO Box City", "FL", "33000", "US");
        let incoming = Account::new("Minimal", "CreateAccount", "dukefirst.last@enjoy.com", vec![beach.clone(), po_box.clone()]);

        stored.apply_update(incoming);

        assert_eq!(stored.addresses, vec![beach, po_box]);
    }

    #[test]
    fn test_apply_update_keeps_identity_and_natural_key() {
        let mut stored = minimal().with_id(AccountId::new(9)).with_account_ref_id("REF-000009");
        let incoming = minimal().with_id(AccountId::new(77)).with_account_ref_id("HIJACKED");

        stored.apply_update(incoming);

        assert_eq!(stored.id, Some(AccountId::new(9)));
        assert_eq!(stored.account_ref_id.as_deref(), Some("REF-000009"));
    }

    #[test]
    fn test_clear_identity_resets_storage_values() {
        let mut account = minimal().with_id(AccountId::new(3));
        account.addresses[0].id = Some(AddressId::new(30));
        account.created_at = Some(Utc::now());

        account.clear_identity();

        assert!(!account.is_persisted());
        assert!(account.created_at.is_none());
        assert!(account.addresses.iter().all(|a| !a.is_persisted()));
    }
}
