//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for accounts that give more
//! meaningful error messages than standard assertions. `Account` equality
//! only compares storage ids, so these helpers compare contents instead.

use domain_account::{Account, AccountError, Address};

/// Asserts that storage assigned identities and timestamps
///
/// # Panics
///
/// Panics if the account or any of its addresses lacks an id, or a timestamp is missing
pub fn assert_account_persisted(account: &Account) {
    assert!(account.id.is_some(), "Expected a persisted account, got id=None");
    assert!(
        account.account_ref_id.is_some(),
        "Expected an account reference ID on account {:?}",
        account.id
    );
    assert!(account.created_at.is_some(), "Expected created_at to be set");
    assert!(account.updated_at.is_some(), "Expected updated_at to be set");
    for (index, address) in account.addresses.iter().enumerate() {
        assert!(address.id.is_some(), "Expected address {} to be persisted", index);
    }
}

/// Asserts that two accounts hold the same names, email, and address contents
pub fn assert_same_contents(actual: &Account, expected: &Account) {
    assert_eq!(actual.first_name, expected.first_name, "First name mismatch");
    assert_eq!(actual.last_name, expected.last_name, "Last name mismatch");
    assert_eq!(actual.email_address, expected.email_address, "Email mismatch");
    assert_addresses_match(&actual.addresses, &expected.addresses);
}

/// Asserts that two address sets hold the same contents, ignoring ids and order
///
/// # Panics
///
/// Panics if the sets differ in size or any address has no counterpart
pub fn assert_addresses_match(actual: &[Address], expected: &[Address]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Address count mismatch: actual={}, expected={}",
        actual.len(),
        expected.len()
    );

    let strip = |a: &Address| Address { id: None, ..a.clone() };
    let mut remaining: Vec<Address> = actual.iter().map(strip).collect();
    for wanted in expected.iter().map(strip) {
        match remaining.iter().position(|a| *a == wanted) {
            Some(index) => {
                remaining.swap_remove(index);
            }
            None => panic!("Expected address not found:\n{}\nin {:?}", wanted.format(), actual),
        }
    }
}

/// Asserts that an operation was rejected as invalid
pub fn assert_validation_error<T: std::fmt::Debug>(result: &Result<T, AccountError>) {
    match result {
        Err(e) if e.is_validation() => {}
        other => panic!("Expected a validation error, got {:?}", other),
    }
}

/// Asserts that an operation failed because the account does not exist
pub fn assert_not_found<T: std::fmt::Debug>(result: &Result<T, AccountError>) {
    match result {
        Err(e) if e.is_not_found() => {}
        other => panic!("Expected a not-found error, got {:?}", other),
    }
}
