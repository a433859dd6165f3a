//! Database connection management and repository implementations.

mod connections;
mod memory;

#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::DatabaseConfig;
pub use memory::{
    InMemoryPostRepository, InMemoryRepository, InMemoryThemeRepository, InMemoryUserRepository,
    MemoryStore,
};

#[cfg(feature = "postgres")]
pub use connections::DatabaseConnections;
#[cfg(feature = "postgres")]
pub use postgres_base::PostgresBaseRepository;
#[cfg(feature = "postgres")]
pub use postgres_repo::{PostgresPostRepository, PostgresThemeRepository, PostgresUserRepository};

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
