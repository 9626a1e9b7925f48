//! Repository implementations for domain entities
//!
//! Repositories encapsulate SQL queries and work on database row types.
//! Mapping rows to domain types is the adapters' job.
//!
//! Queries are checked at runtime (`sqlx::query_as::<_, Row>`), so the crate
//! builds without a live database.

pub mod account;

pub use account::{AccountRecord, AccountRepository, AccountRow, AddressRow, NewAccount, NewAddress};
