//! In-memory store - used when no database is configured, and in tests.
//!
//! Mirrors the relational schema closely enough that handlers cannot tell
//! the difference: ids come from per-table sequences that are never reused,
//! and foreign-key and unique constraints are enforced on write.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use blog_core::domain::{Post, Theme, User};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository, ThemeRepository, UserRepository};

/// One table: rows keyed by id plus the last id handed out.
pub(crate) struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn contains(&self, id: Option<i64>) -> bool {
        id.is_some_and(|id| self.rows.contains_key(&id))
    }

    /// Id the row will be stored under: its own when known, else the next in sequence.
    fn resolve_id(&mut self, id: Option<i64>) -> i64 {
        match id {
            Some(id) if self.rows.contains_key(&id) => id,
            _ => {
                self.last_id += 1;
                self.last_id
            }
        }
    }
}

#[derive(Default)]
pub(crate) struct Tables {
    posts: Table<Post>,
    themes: Table<Theme>,
    users: Table<User>,
}

/// Shared handle to the in-process tables. Cloning shares the data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryRepository::new(self.clone())
    }

    pub fn themes(&self) -> InMemoryThemeRepository {
        InMemoryRepository::new(self.clone())
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryRepository::new(self.clone())
    }
}

/// A domain entity that lives in one of the [`MemoryStore`] tables.
pub(crate) trait MemoryRow: Clone + Send + Sync + 'static {
    const NAME: &'static str;

    fn id(&self) -> Option<i64>;
    fn set_id(&mut self, id: i64);

    fn table(tables: &Tables) -> &Table<Self>;
    fn table_mut(tables: &mut Tables) -> &mut Table<Self>;

    /// Constraints a row must satisfy before it is written.
    fn check_write(&self, _tables: &Tables) -> Result<(), RepoError> {
        Ok(())
    }

    /// Constraints that must hold before the row with `id` is removed.
    fn check_delete(_id: i64, _tables: &Tables) -> Result<(), RepoError> {
        Ok(())
    }
}

impl MemoryRow for Post {
    const NAME: &'static str = "posts";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.posts
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.posts
    }

    fn check_write(&self, tables: &Tables) -> Result<(), RepoError> {
        if let Some(theme_id) = self.theme_id {
            if !tables.themes.contains(Some(theme_id)) {
                return Err(RepoError::Constraint(format!(
                    "posts.theme_id references missing theme {theme_id}"
                )));
            }
        }
        if let Some(user_id) = self.user_id {
            if !tables.users.contains(Some(user_id)) {
                return Err(RepoError::Constraint(format!(
                    "posts.user_id references missing user {user_id}"
                )));
            }
        }
        Ok(())
    }
}

impl MemoryRow for Theme {
    const NAME: &'static str = "themes";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.themes
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.themes
    }

    fn check_delete(id: i64, tables: &Tables) -> Result<(), RepoError> {
        if tables.posts.rows.values().any(|p| p.theme_id == Some(id)) {
            return Err(RepoError::Constraint(format!(
                "theme {id} is still referenced by posts"
            )));
        }
        Ok(())
    }
}

impl MemoryRow for User {
    const NAME: &'static str = "users";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.users
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.users
    }

    fn check_write(&self, tables: &Tables) -> Result<(), RepoError> {
        let taken = tables
            .users
            .rows
            .values()
            .any(|u| u.username == self.username && u.id != self.id);
        if taken {
            return Err(RepoError::Constraint(format!(
                "users.username '{}' already exists",
                self.username
            )));
        }
        Ok(())
    }

    fn check_delete(id: i64, tables: &Tables) -> Result<(), RepoError> {
        if tables.posts.rows.values().any(|p| p.user_id == Some(id)) {
            return Err(RepoError::Constraint(format!(
                "user {id} is still referenced by posts"
            )));
        }
        Ok(())
    }
}

/// Generic in-memory repository over one [`MemoryStore`] table.
pub struct InMemoryRepository<T> {
    store: MemoryStore,
    _entity: PhantomData<T>,
}

impl<T> InMemoryRepository<T> {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }
}

/// In-memory post repository.
pub type InMemoryPostRepository = InMemoryRepository<Post>;

/// In-memory theme repository.
pub type InMemoryThemeRepository = InMemoryRepository<Theme>;

/// In-memory user repository.
pub type InMemoryUserRepository = InMemoryRepository<User>;

impl<T: MemoryRow> InMemoryRepository<T> {
    async fn find_where(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        let tables = self.store.tables.read().await;
        T::table(&tables)
            .rows
            .values()
            .filter(|row| keep(*row))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl<T: MemoryRow> BaseRepository<T, i64> for InMemoryRepository<T> {
    async fn find_all(&self) -> Result<Vec<T>, RepoError> {
        Ok(self.find_where(|_| true).await)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<T>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(T::table(&tables).rows.get(&id).cloned())
    }

    async fn save(&self, mut entity: T) -> Result<T, RepoError> {
        let mut tables = self.store.tables.write().await;
        entity.check_write(&tables)?;

        let table = T::table_mut(&mut tables);
        let id = table.resolve_id(entity.id());
        entity.set_id(id);
        table.rows.insert(id, entity.clone());

        tracing::debug!(table = T::NAME, id, "Row saved");
        Ok(entity)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;
        T::check_delete(id, &tables)?;

        match T::table_mut(&mut tables).rows.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all_by_title_containing_ignore_case(
        &self,
        term: &str,
    ) -> Result<Vec<Post>, RepoError> {
        Ok(self
            .find_where(|post| contains_ignore_case(&post.title, term))
            .await)
    }
}

#[async_trait]
impl ThemeRepository for InMemoryThemeRepository {
    async fn find_by_description_containing_ignore_case(
        &self,
        term: &str,
    ) -> Result<Vec<Theme>, RepoError> {
        Ok(self
            .find_where(|theme| contains_ignore_case(&theme.description, term))
            .await)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .find_where(|user| user.username == username)
            .await
            .into_iter()
            .next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str) -> Post {
        Post::new(title.to_string(), "A body long enough.".to_string())
    }

    #[tokio::test]
    async fn test_empty_store() {
        let store = MemoryStore::new();
        assert!(store.posts().find_all().await.unwrap().is_empty());
        assert!(store.themes().find_by_id(1).await.unwrap().is_none());
        assert!(
            store
                .themes()
                .find_by_description_containing_ignore_case("rust")
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_save_then_find_by_id() {
        let repo = MemoryStore::new().posts();
        let draft = post("Hello World");

        let saved = repo.save(draft.clone()).await.unwrap();
        assert_eq!(saved.id, Some(1));

        let found = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(found.title, draft.title);
        assert_eq!(found.body, draft.body);
        assert_eq!(found.created_at, draft.created_at);
    }

    #[tokio::test]
    async fn test_save_known_id_replaces_row() {
        let store = MemoryStore::new();
        let themes = store.themes();
        let posts = store.posts();
        let theme = themes.save(Theme::new("Rust".to_string())).await.unwrap();

        let saved = posts
            .save(post("First title").with_theme(theme.id))
            .await
            .unwrap();
        let replaced = posts
            .save(post("Second title").with_id(saved.id.unwrap()))
            .await
            .unwrap();

        assert_eq!(replaced.id, saved.id);
        let all = posts.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "Second title");
        assert_eq!(all[0].theme_id, None);
    }

    #[tokio::test]
    async fn test_save_unknown_id_inserts_with_fresh_id() {
        let repo = MemoryStore::new().themes();
        repo.save(Theme::new("one".to_string())).await.unwrap();

        let saved = repo
            .save(Theme::new("two".to_string()).with_id(42))
            .await
            .unwrap();
        assert_eq!(saved.id, Some(2));
        assert!(repo.find_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = MemoryStore::new().themes();
        repo.save(Theme::new("one".to_string())).await.unwrap();
        repo.delete(1).await.unwrap();

        let saved = repo.save(Theme::new("two".to_string())).await.unwrap();
        assert_eq!(saved.id, Some(2));
    }

    #[tokio::test]
    async fn test_delete_missing_row() {
        let repo = MemoryStore::new().posts();
        assert!(matches!(repo.delete(7).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_description_search_ignores_case() {
        let repo = MemoryStore::new().themes();
        for description in ["Rust", "Trust issues", "Go", "rusty nails"] {
            repo.save(Theme::new(description.to_string())).await.unwrap();
        }

        let found: Vec<String> = repo
            .find_by_description_containing_ignore_case("RUST")
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.description)
            .collect();
        assert_eq!(found, vec!["Rust", "Trust issues", "rusty nails"]);
    }

    #[tokio::test]
    async fn test_title_search_is_literal() {
        let repo = MemoryStore::new().posts();
        repo.save(post("100% Rust")).await.unwrap();
        repo.save(post("1000 Rust")).await.unwrap();

        let found = repo
            .find_all_by_title_containing_ignore_case("0% r")
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "100% Rust");
    }

    #[tokio::test]
    async fn test_post_with_missing_theme_is_rejected() {
        let repo = MemoryStore::new().posts();
        let result = repo.save(post("Orphaned post").with_theme(Some(9))).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_referenced_theme_cannot_be_deleted() {
        let store = MemoryStore::new();
        let theme = store
            .themes()
            .save(Theme::new("Rust".to_string()))
            .await
            .unwrap();
        store
            .posts()
            .save(post("Filed under Rust").with_theme(theme.id))
            .await
            .unwrap();

        let result = store.themes().delete(theme.id.unwrap()).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_username_is_unique() {
        let repo = MemoryStore::new().users();
        let ana = repo
            .save(User::new("Ana".to_string(), "ana@example.com".to_string()))
            .await
            .unwrap();

        let dup = repo
            .save(User::new("Other".to_string(), "ana@example.com".to_string()))
            .await;
        assert!(matches!(dup, Err(RepoError::Constraint(_))));

        // Re-saving the same user under its own id is not a conflict.
        let renamed = User {
            name: "Ana Maria".to_string(),
            ..ana.clone()
        };
        assert!(repo.save(renamed).await.is_ok());

        let found = repo.find_by_username("ana@example.com").await.unwrap();
        assert_eq!(found.map(|u| u.name), Some("Ana Maria".to_string()));
    }
}
