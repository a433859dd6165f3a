//! # Blog Infrastructure
//!
//! Concrete implementations of the persistence gateway defined in `blog-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM
//! - `minimal` - No external dependencies, in-memory store only

pub mod database;

pub use database::{DatabaseConfig, MemoryStore};

#[cfg(feature = "postgres")]
pub use database::DatabaseConnections;
