//! Domain Adapters
//!
//! This module provides adapter implementations for domain ports,
//! connecting domain interfaces to the PostgreSQL database layer.
//!
//! # Architecture
//!
//! Each adapter:
//! - Implements the domain's port trait
//! - Translates between domain models and database row types
//! - Uses the repository layer for database operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresAccountAdapter;
//! use domain_account::AccountPort;
//!
//! let adapter = PostgresAccountAdapter::new(pool);
//! let account = adapter.find_by_id(account_id).await?;
//! ```

pub mod account;

pub use account::PostgresAccountAdapter;
