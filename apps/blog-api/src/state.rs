//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::{PostRepository, ThemeRepository, UserRepository};
use blog_infra::{DatabaseConfig, MemoryStore};

#[cfg(feature = "postgres")]
use blog_infra::database::{
    PostgresPostRepository, PostgresThemeRepository, PostgresUserRepository,
};
#[cfg(feature = "postgres")]
use blog_infra::DatabaseConnections;

/// Shared application state: one gateway handle per entity.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub themes: Arc<dyn ThemeRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let state = match db_config {
            Some(config) => match DatabaseConnections::init(config).await {
                Ok(connections) => Self::postgres(connections),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory(MemoryStore::new())
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory(MemoryStore::new())
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            if db_config.is_some() {
                tracing::warn!("Built without postgres feature - ignoring DATABASE_URL");
            }
            tracing::info!("Running without postgres feature - using in-memory repositories");
            Self::in_memory(MemoryStore::new())
        };

        tracing::info!("Application state initialized");
        state
    }

    /// Repositories backed by the in-process store.
    pub fn in_memory(store: MemoryStore) -> Self {
        Self {
            posts: Arc::new(store.posts()),
            themes: Arc::new(store.themes()),
            users: Arc::new(store.users()),
        }
    }

    #[cfg(feature = "postgres")]
    fn postgres(connections: DatabaseConnections) -> Self {
        let db = connections.main;
        Self {
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            themes: Arc::new(PostgresThemeRepository::new(db.clone())),
            users: Arc::new(PostgresUserRepository::new(db)),
        }
    }
}
