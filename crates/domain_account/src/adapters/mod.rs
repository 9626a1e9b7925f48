//! Storage Adapters for the Account Domain
//!
//! Adapters implement the [`AccountPort`](crate::ports::AccountPort) trait so
//! the service can run against whichever storage the deployment selects.
//!
//! # Available Adapters
//!
//! - **InMemoryAccountAdapter**: Process-local store, used for development and tests
//! - **MockAccountPort**: Call-recording mock (re-exported from the ports module)
//!
//! The PostgreSQL adapter lives in `infra_db`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_account::adapters::InMemoryAccountAdapter;
//! use domain_account::AccountPort;
//! use std::sync::Arc;
//!
//! let port: Arc<dyn AccountPort> = Arc::new(InMemoryAccountAdapter::new());
//! ```

pub mod memory;

pub use memory::InMemoryAccountAdapter;
