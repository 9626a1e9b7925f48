//! Account Management Domain
//!
//! This crate manages customer accounts and the postal addresses they own.
//!
//! # Aggregate Model
//!
//! - **Account**: the aggregate root, identified by a storage id and by a
//!   caller-meaningful natural key (`account_ref_id`)
//! - **Address**: owned exclusively by one account; created, updated and
//!   deleted only through it
//!
//! Storage is reached through the [`AccountPort`] repository port, so the
//! [`AccountService`] runs unchanged against PostgreSQL, the in-memory
//! adapter, or the mock.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use domain_account::{Account, AccountService, Address, InMemoryAccountAdapter};
//!
//! # tokio_test_block(async {
//! let service = AccountService::new(Arc::new(InMemoryAccountAdapter::new()));
//!
//! let account = Account::new(
//!     "Minimal",
//!     "CreateAccount",
//!     "dukefirst.last@enjoy.com",
//!     vec![Address::new("100", "Food Forest City", "FL", "33000", "US")],
//! );
//!
//! let created = service.create(account).await.unwrap();
//! assert!(created.id.is_some());
//! assert!(created.account_ref_id.is_some());
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod account;
pub mod address;
pub mod error;
pub mod validation;
pub mod ports;
pub mod adapters;
pub mod service;

pub use account::{Account, ACCOUNT_REF_ID_MAX_LEN, generate_account_ref_id};
pub use address::Address;
pub use error::AccountError;
pub use validation::{AccountValidator, ValidationReport, Violation};
pub use ports::AccountPort;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::{MockAccountPort, PortCall, PortOperation};
pub use adapters::InMemoryAccountAdapter;
pub use service::AccountService;
