//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random accounts and addresses.
//! Strategies named `valid_*` only produce values every constraint accepts.

use proptest::prelude::*;

use domain_account::{Account, Address};

/// Strategy for names within the 2-200 character limit
pub fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,29}"
}

/// Strategy for email addresses the validator accepts
pub fn valid_email_strategy() -> impl Strategy<Value = String> {
    ("[a-z][a-z0-9]{0,15}", "[a-z]{2,12}", prop_oneof![Just("com"), Just("net"), Just("org")])
        .prop_map(|(local, domain, tld)| format!("{}@{}.{}", local, domain, tld))
}

/// Strategy for email addresses the validator rejects
pub fn invalid_email_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // No dot in the domain
        ("[a-z]{1,10}", "[a-z]{1,10}").prop_map(|(l, d)| format!("{}@{}", l, d)),
        // Numeric top-level label
        ("[a-z]{1,10}", "[0-9]{1,3}").prop_map(|(l, n)| format!("{}@111.222.333.{}", l, n)),
        // Missing @
        "[a-z]{1,10}\\.[a-z]{2,5}",
        // Quoted local part
        ("[a-z]{1,10}", "[a-z]{2,10}").prop_map(|(l, d)| format!("\"{}\"@{}.com", l, d)),
    ]
}

/// Strategy for addresses every constraint accepts
pub fn valid_address_strategy() -> impl Strategy<Value = Address> {
    (
        "[1-9][0-9]{0,4} [A-Z][a-z]{2,20} (Street|Lane|Way)",
        proptest::option::of("Suite #[0-9]{1,4}"),
        "[A-Z][a-z]{2,20}( City)?",
        "[A-Z]{2}",
        "[0-9]{5}(-[0-9]{4})?",
    )
        .prop_map(|(line1, line2, city, state, postal_code)| {
            let address = Address::new(line1, city, state, postal_code, "US");
            match line2 {
                Some(line2) => address.with_line2(line2),
                None => address,
            }
        })
}

/// Strategy for accounts every constraint accepts, with 1-4 addresses
///
/// The reference ID is left unset so the service generates one.
pub fn valid_account_strategy() -> impl Strategy<Value = Account> {
    (
        name_strategy(),
        name_strategy(),
        valid_email_strategy(),
        prop::collection::vec(valid_address_strategy(), 1..5),
    )
        .prop_map(|(first, last, email, addresses)| Account::new(first, last, email, addresses))
}
