//! Pre-built Test Fixtures
//!
//! Provides ready-to-use accounts and addresses. These fixtures are fixed
//! values, so two calls return equal data; use the builders when a test
//! needs unique emails or reference IDs.

use domain_account::{Account, Address};

/// The single address of the minimal account
pub fn food_forest_address() -> Address {
    Address::new("100", "Food Forest City", "FL", "33000", "US")
}

/// A second valid address
pub fn beach_address() -> Address {
    Address::new("1 Beach Sunny Drive", "Beach Waves City", "FL", "33000", "US")
}

/// An address using both optional fields
pub fn po_box_address() -> Address {
    Address::new("100 Peaches and Fructose Way", "PO Box City", "FL", "33000", "US")
        .with_line2("Suite #100")
        .with_province("Orange County")
}

/// Minimal / CreateAccount / dukefirst.last@enjoy.com with one address
pub fn minimal_account() -> Account {
    Account::new(
        "Minimal",
        "CreateAccount",
        "dukefirst.last@enjoy.com",
        vec![food_forest_address()],
    )
}

/// A fully populated account with a fixed reference ID
pub fn duke_account() -> Account {
    Account::new(
        "DukeFirstName",
        "DukeLastName",
        "dukefirstlast@duke.com",
        vec![food_forest_address(), po_box_address()],
    )
    .with_account_ref_id("REF-DUKE-0001")
}

/// Emails the validator rejects
pub const INVALID_EMAILS: &[&str] = &[
    "\u{3042}\u{3044}\u{3046}\u{3048}\u{304a}@example.com",
    "email@example",
    "email@example.weber1",
    "email@111.222.333.44444",
    "just\u{201d}not\u{201d}right@example.com",
    "a@b",
];

/// Emails the validator accepts
pub const VALID_EMAILS: &[&str] = &[
    "dukefirst.last@enjoy.com",
    "updatedemail@testing.net",
    "first+tag@sub.example.co.uk",
];
