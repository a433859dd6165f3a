use async_trait::async_trait;

use crate::domain::{Post, Theme, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// List every entity, ordered by id. Empty when the store is empty.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity.
    ///
    /// An entity without an id, or whose id is unknown to the store, is
    /// inserted under a freshly assigned id. A known id is overwritten in
    /// full. Returns the entity as stored.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Fails with [`RepoError::NotFound`] when
    /// no row matched.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    /// Posts whose title contains `term`, ignoring case.
    async fn find_all_by_title_containing_ignore_case(
        &self,
        term: &str,
    ) -> Result<Vec<Post>, RepoError>;
}

/// Theme repository.
#[async_trait]
pub trait ThemeRepository: BaseRepository<Theme, i64> {
    /// Themes whose description contains `term`, ignoring case.
    async fn find_by_description_containing_ignore_case(
        &self,
        term: &str,
    ) -> Result<Vec<Theme>, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i64> {
    /// Find a user by their username (e-mail).
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}
