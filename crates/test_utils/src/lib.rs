//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! account service test suite.
//!
//! # Modules
//!
//! - `fixtures`: Fixed accounts, addresses, and email lists
//! - `builders`: Builder patterns for test data construction
//! - `database`: Database test helpers and container management
//! - `assertions`: Content-based assertion helpers for accounts
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
