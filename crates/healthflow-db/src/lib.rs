//! HealthFlow Database — SurrealDB connection management and the
//! resource store.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Schema initialization, seed data and migrations ([`run_migrations`])
//! - Error types ([`DbError`])
//! - Repository implementations of the `healthflow-core` traits
//!   ([`repository`])

mod connection;
mod error;
pub mod repository;
mod schema;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use schema::{SEED_RESOURCE_IDS, run_migrations};
