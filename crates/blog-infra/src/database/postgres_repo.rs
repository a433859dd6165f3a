//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use blog_core::domain::{Post, Theme, User};
use blog_core::error::RepoError;
use blog_core::ports::{PostRepository, ThemeRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::theme::{self, Entity as ThemeEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, repo_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL theme repository.
pub type PostgresThemeRepository = PostgresBaseRepository<ThemeEntity>;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// `%term%`, lowercased, with the term's own wildcards escaped so they
/// match literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.to_lowercase().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// `LOWER(column) LIKE '%term%'`.
fn containing_ignore_case<C: ColumnTrait>(column: C, term: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column)))
        .like(LikeExpr::new(like_pattern(term)).escape('\\'))
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_all_by_title_containing_ignore_case(
        &self,
        term: &str,
    ) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(term, "Searching posts by title");

        let result = PostEntity::find()
            .filter(containing_ignore_case(post::Column::Title, term))
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl ThemeRepository for PostgresThemeRepository {
    async fn find_by_description_containing_ignore_case(
        &self,
        term: &str,
    ) -> Result<Vec<Theme>, RepoError> {
        tracing::debug!(term, "Searching themes by description");

        let result = ThemeEntity::find()
            .filter(containing_ignore_case(theme::Column::Description, term))
            .order_by_asc(theme::Column::Id)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        // Mask the e-mail to keep PII out of logs
        let masked = match username.split_once('@') {
            Some((local, domain)) => match local.chars().next() {
                Some(first) if local.chars().count() > 1 => format!("{first}***@{domain}"),
                _ => format!("***@{domain}"),
            },
            None => "***".to_string(),
        };
        tracing::debug!(username = %masked, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.map(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn test_like_pattern() {
        assert_eq!(like_pattern("Rust"), "%rust%");
        assert_eq!(like_pattern(""), "%%");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("100%"), r"%100\%%");
        assert_eq!(like_pattern("snake_case"), r"%snake\_case%");
        assert_eq!(like_pattern(r"a\b"), r"%a\\b%");
    }
}
