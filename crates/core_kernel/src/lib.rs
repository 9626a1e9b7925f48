//! Core Kernel - Foundational types shared by the accounts service crates
//!
//! This crate provides the fundamental building blocks used across all layers:
//! - Strongly-typed, storage-assigned identifiers
//! - The port error type and marker traits for hexagonal adapters
//! - Common error types

pub mod identifiers;
pub mod error;
pub mod ports;

pub use identifiers::{AccountId, AddressId};
pub use error::CoreError;
pub use ports::{PortError, DomainPort, AdapterHealth, HealthCheckResult, HealthCheckable};
