//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL storage for accounts and their
//! addresses, using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern:
//!
//! - `repositories` hold the SQL and work on row types
//! - `adapters` implement the domain's `AccountPort` on top of the repositories
//! - `pool` creates the connection pool and applies the migrations
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresAccountAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/accounts")).await?;
//! run_migrations(&pool).await?;
//! let adapter = PostgresAccountAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use repositories::AccountRepository;
pub use adapters::PostgresAccountAdapter;
