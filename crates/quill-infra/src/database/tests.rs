#[cfg(test)]
mod tests {
    use crate::database::entity::post;
    use crate::database::postgres_repo::PostgresPostRepository;
    use quill_core::domain::{FindOptions, NewPost, Post, PostChanges, PostFilter, PostId};
    use quill_core::error::RepoError;
    use quill_core::ports::{BaseRepository, PostRepository};
    use crate::database::postgres_base::repo_error;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr};

    fn model(id: PostId, title: &str, body: &str) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id: id.to_string(),
            title: title.to_owned(),
            body: body.to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let post_id = PostId::generate();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model(post_id, "Test Post", "Body")]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let repo: &dyn PostRepository = &repo;

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, post_id);
    }

    #[tokio::test]
    async fn test_find_post_by_id_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let repo: &dyn PostRepository = &repo;

        let result: Option<Post> = repo.find_by_id(PostId::generate()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_id_is_reported() {
        let mut row = model(PostId::generate(), "Test Post", "Body");
        row.id = "not-an-object-id".to_owned();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![row]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let repo: &dyn PostRepository = &repo;

        let result: Result<Option<Post>, RepoError> = repo.find_by_id(PostId::generate()).await;
        assert!(matches!(result, Err(RepoError::Corrupt(_))));
    }

    #[tokio::test]
    async fn test_insert_returns_stored_post() {
        let post_id = PostId::generate();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model(post_id, "Hello", "World")]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let post = repo.insert(NewPost::new("Hello", "World")).await.unwrap();
        assert_eq!(post.id, post_id);
        assert_eq!(post.body, "World");

        let log = format!("{:?}", repo.db.into_transaction_log());
        assert!(log.contains("INSERT INTO"));
        assert!(log.contains("created_at"));
    }

    #[tokio::test]
    async fn test_find_applies_filter_and_limit() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                model(PostId::generate(), "Post 1", "a"),
                model(PostId::generate(), "Post 10", "b"),
            ]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let filter = PostFilter::new(Some("1".to_owned()), None);
        let posts = repo
            .find(&filter, FindOptions::with_limit(Some(2)))
            .await
            .unwrap();
        assert_eq!(posts.len(), 2);

        let log = format!("{:?}", repo.db.into_transaction_log());
        assert!(log.contains("LIKE"));
        assert!(log.contains("LIMIT"));
        assert!(log.contains("ORDER BY"));
    }

    #[tokio::test]
    async fn test_find_escapes_like_wildcards() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let filter = PostFilter::new(Some("_".to_owned()), Some("100%".to_owned()));
        let posts = repo.find(&filter, FindOptions::default()).await.unwrap();
        assert!(posts.is_empty());

        let log = format!("{:?}", repo.db.into_transaction_log());
        assert!(log.contains("ESCAPE"));
        assert!(log.contains(r#""%\\_%""#));
        assert!(log.contains(r#""%100\\%%""#));
    }

    #[tokio::test]
    async fn test_find_without_limit() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let posts = repo
            .find(&PostFilter::default(), FindOptions::with_limit(Some(0)))
            .await
            .unwrap();
        assert!(posts.is_empty());

        let log = format!("{:?}", repo.db.into_transaction_log());
        assert!(!log.contains("LIMIT"));
        assert!(!log.contains("LIKE"));
    }

    #[tokio::test]
    async fn test_update_returns_updated_post() {
        let post_id = PostId::generate();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model(post_id, "Renamed", "Body")]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let changes = PostChanges {
            title: Some("Renamed".to_owned()),
            body: None,
        };
        let post = repo.update(post_id, changes).await.unwrap().unwrap();
        assert_eq!(post.title, "Renamed");

        let log = format!("{:?}", repo.db.into_transaction_log());
        assert!(log.contains("UPDATE"));
        assert!(log.contains("updated_at"));
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result = repo
            .update(PostId::generate(), PostChanges::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let repo: &dyn PostRepository = &repo;
        let post_id = PostId::generate();

        assert_eq!(repo.delete(post_id).await.unwrap().deleted_count, 1);
        assert_eq!(repo.delete(post_id).await.unwrap().deleted_count, 0);
    }

    #[test]
    fn test_repo_error_classification() {
        let conn = repo_error(DbErr::Conn(RuntimeErr::Internal("refused".to_owned())));
        assert!(matches!(conn, RepoError::Connection(_)));

        // Only driver-reported constraint codes count as constraint violations.
        let custom = repo_error(DbErr::Custom("value violates nothing".to_owned()));
        assert!(matches!(custom, RepoError::Query(_)));
    }
}
