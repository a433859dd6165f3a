#[cfg(test)]
mod tests {
    use crate::database::entity::{post, theme};
    use crate::database::postgres_repo::{PostgresPostRepository, PostgresThemeRepository};
    use blog_core::RepoError;
    use blog_core::domain::{Post, Theme};
    use blog_core::ports::{BaseRepository, PostRepository, ThemeRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction};

    fn post_model(id: i64, title: &str) -> post::Model {
        post::Model {
            id,
            title: title.to_owned(),
            body: "Content long enough".to_owned(),
            created_at: chrono::Utc::now().into(),
            theme_id: None,
            user_id: None,
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model(1, "Test Post")]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(1).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, Some(1));
    }

    #[tokio::test]
    async fn test_find_post_by_unknown_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(99).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_find_all_themes() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                theme::Model {
                    id: 1,
                    description: "Rust".to_owned(),
                },
                theme::Model {
                    id: 2,
                    description: "Go".to_owned(),
                },
            ]])
            .into_connection();

        let repo = PostgresThemeRepository::new(db);

        let themes: Vec<Theme> = repo.find_all().await.unwrap();
        assert_eq!(themes.len(), 2);
        assert_eq!(themes[1].description, "Go");
    }

    #[tokio::test]
    async fn test_save_new_post_inserts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model(7, "Hello World")]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let saved: Post = repo
            .save(Post::new(
                "Hello World".to_owned(),
                "Content long enough".to_owned(),
            ))
            .await
            .unwrap();
        assert_eq!(saved.id, Some(7));

        let log = repo.db.into_transaction_log();
        assert_eq!(log.len(), 1);
        assert!(format!("{:?}", log[0]).contains("INSERT INTO"));
    }

    #[tokio::test]
    async fn test_save_unknown_id_falls_back_to_insert() {
        // UPDATE ... RETURNING yields no row, then INSERT ... RETURNING succeeds.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<theme::Model>::new()])
            .append_query_results(vec![vec![theme::Model {
                id: 3,
                description: "Rust".to_owned(),
            }]])
            .into_connection();

        let repo = PostgresThemeRepository::new(db);

        let saved: Theme = repo
            .save(Theme::new("Rust".to_owned()).with_id(42))
            .await
            .unwrap();
        assert_eq!(saved.id, Some(3));

        let log: Vec<Transaction> = repo.db.into_transaction_log();
        assert_eq!(log.len(), 2);
        assert!(format!("{:?}", log[0]).contains("UPDATE"));
        assert!(format!("{:?}", log[1]).contains("INSERT INTO"));
    }

    #[tokio::test]
    async fn test_delete_reports_missing_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result = BaseRepository::<Post, i64>::delete(&repo, 5).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_title_search_filters_on_lowered_title() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model(1, "100% Rust")]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let found = repo
            .find_all_by_title_containing_ignore_case("0% R")
            .await
            .unwrap();
        assert_eq!(found.len(), 1);

        let log = format!("{:?}", repo.db.into_transaction_log());
        assert!(log.contains("LOWER"));
        assert!(log.contains("LIKE"));
    }

    #[tokio::test]
    async fn test_description_search_returns_matches() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![theme::Model {
                id: 4,
                description: "Rusty".to_owned(),
            }]])
            .into_connection();

        let repo = PostgresThemeRepository::new(db);

        let found = repo
            .find_by_description_containing_ignore_case("rust")
            .await
            .unwrap();
        assert_eq!(found, vec![Theme::new("Rusty".to_owned()).with_id(4)]);
    }
}
