//! Account DTOs
//!
//! Wire names are camelCase (`accountRefId`, `emailAddress`, `address1`, ...).
//! Missing request strings deserialize as empty so the validator, not the
//! JSON parser, reports them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::AddressId;
use domain_account::{Account, Address};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountRequest {
    pub account_ref_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub addresses: Vec<AddressRequest>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressRequest {
    /// Set to update an existing address in place
    pub id: Option<i64>,
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub province: Option<String>,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: Option<i64>,
    pub account_ref_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub addresses: Vec<AddressResponse>,
    pub create_date_time: Option<DateTime<Utc>>,
    pub update_date_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub id: Option<i64>,
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub province: Option<String>,
    pub postal_code: String,
    pub country: String,
}

impl From<AddressRequest> for Address {
    fn from(request: AddressRequest) -> Self {
        Address {
            id: request.id.map(AddressId::new),
            line1: request.address1,
            line2: request.address2,
            city: request.city,
            state: request.state,
            province: request.province,
            postal_code: request.postal_code,
            country: request.country,
        }
    }
}

impl From<AccountRequest> for Account {
    fn from(request: AccountRequest) -> Self {
        let account = Account::new(
            request.first_name,
            request.last_name,
            request.email_address,
            request.addresses.into_iter().map(Address::from).collect(),
        );
        match request.account_ref_id {
            Some(account_ref_id) => account.with_account_ref_id(account_ref_id),
            None => account,
        }
    }
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            id: address.id.map(|id| id.value()),
            address1: address.line1,
            address2: address.line2,
            city: address.city,
            state: address.state,
            province: address.province,
            postal_code: address.postal_code,
            country: address.country,
        }
    }
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id.map(|id| id.value()),
            account_ref_id: account.account_ref_id,
            first_name: account.first_name,
            last_name: account.last_name,
            email_address: account.email_address,
            addresses: account.addresses.into_iter().map(AddressResponse::from).collect(),
            create_date_time: account.created_at,
            update_date_time: account.updated_at,
        }
    }
}
