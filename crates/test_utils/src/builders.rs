//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.
//!
//! Every `AccountBuilder` starts with a fresh reference ID and email address,
//! so accounts built in the same database never collide on a unique key.

use fake::faker::address::en::{CityName, StateAbbr, StreetName};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use uuid::Uuid;

use domain_account::{Account, Address};

use crate::fixtures::food_forest_address;

/// Builder for constructing test accounts
#[derive(Debug, Clone)]
pub struct AccountBuilder {
    account_ref_id: Option<String>,
    first_name: String,
    last_name: String,
    email_address: String,
    addresses: Vec<Address>,
}

impl Default for AccountBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountBuilder {
    /// Creates a new builder with a unique reference ID and email
    pub fn new() -> Self {
        let unique = Uuid::new_v4().simple().to_string();
        Self {
            account_ref_id: Some(format!("REF-{}", unique)),
            first_name: FirstName().fake(),
            last_name: LastName().fake(),
            email_address: format!("duke.{}@enjoy.com", unique),
            addresses: vec![food_forest_address()],
        }
    }

    /// Sets the reference ID
    pub fn with_account_ref_id(mut self, account_ref_id: impl Into<String>) -> Self {
        self.account_ref_id = Some(account_ref_id.into());
        self
    }

    /// Leaves the reference ID for the service to generate
    pub fn without_account_ref_id(mut self) -> Self {
        self.account_ref_id = None;
        self
    }

    /// Sets the first and last name
    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    /// Sets the email address
    pub fn with_email(mut self, email_address: impl Into<String>) -> Self {
        self.email_address = email_address.into();
        self
    }

    /// Replaces the address set
    pub fn with_addresses(mut self, addresses: Vec<Address>) -> Self {
        self.addresses = addresses;
        self
    }

    /// Appends an address
    pub fn add_address(mut self, address: Address) -> Self {
        self.addresses.push(address);
        self
    }

    /// Removes every address
    pub fn without_addresses(mut self) -> Self {
        self.addresses.clear();
        self
    }

    /// Builds the unpersisted account
    pub fn build(self) -> Account {
        let account = Account::new(self.first_name, self.last_name, self.email_address, self.addresses);
        match self.account_ref_id {
            Some(account_ref_id) => account.with_account_ref_id(account_ref_id),
            None => account,
        }
    }
}

/// Builder for constructing test addresses
#[derive(Debug, Clone)]
pub struct AddressBuilder {
    address: Address,
}

impl Default for AddressBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressBuilder {
    /// Creates a builder with a random US street address
    pub fn new() -> Self {
        let street: String = StreetName().fake();
        let number = (1u16..9999).fake::<u16>();
        Self {
            address: Address::new(
                format!("{} {}", number, street),
                CityName().fake::<String>(),
                StateAbbr().fake::<String>(),
                "33000",
                "US",
            ),
        }
    }

    /// Sets the second address line
    pub fn with_line2(mut self, line2: impl Into<String>) -> Self {
        self.address.line2 = Some(line2.into());
        self
    }

    /// Sets the city
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.address.city = city.into();
        self
    }

    /// Sets the state
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.address.state = state.into();
        self
    }

    /// Sets the postal code
    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.address.postal_code = postal_code.into();
        self
    }

    /// Builds the unpersisted address
    pub fn build(self) -> Address {
        self.address
    }
}
