#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use quill_core::domain::Post;
    use quill_core::ports::{FavoriteRepository, PostRepository, UserRepository};

    use crate::database::entity::{post, user};
    use crate::database::postgres_repo::{
        PostgresFavoriteRepository, PostgresPostRepository, PostgresUserRepository,
    };

    fn post_model(id: i32, author: &str) -> post::Model {
        post::Model {
            id,
            title: "Test Post".to_owned(),
            description: "Content".to_owned(),
            date: chrono::Utc::now().into(),
            author_id: Some(author.to_owned()),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id_and_author() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model(7, "u1")]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id_and_author(7, "u1").await.unwrap();

        assert!(result.is_some());
        let post = result.unwrap();
        assert_eq!(post.id, 7);
        assert_eq!(post.author_id.as_deref(), Some("u1"));
    }

    #[tokio::test]
    async fn test_ownership_miss_yields_none() {
        // The combined (id, author) filter returning no row is how the
        // conflated not-found-or-forbidden case is established.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result = repo.find_by_id_and_author(7, "intruder").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_find_all_by_author() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model(1, "u1"), post_model(2, "u1")]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let posts = repo.find_all_by_author("u1").await.unwrap();
        assert_eq!(posts.len(), 2);
        assert!(posts.iter().all(|p| p.author_id.as_deref() == Some("u1")));
    }

    #[tokio::test]
    async fn test_find_user_by_id() {
        let now = chrono::Utc::now();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user::Model {
                id: "u1".to_owned(),
                email: "a@b.com".to_owned(),
                first_name: Some("Jane".to_owned()),
                last_name: None,
                avatar_url: None,
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresUserRepository::new(db);

        let user = repo.find_by_id("u1").await.unwrap().unwrap();
        assert_eq!(user.email, "a@b.com");
        assert_eq!(user.first_name.as_deref(), Some("Jane"));
    }

    #[tokio::test]
    async fn test_favorite_remove_missing_pair_is_ok() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresFavoriteRepository::new(db);

        assert!(repo.delete_all("u1", 42).await.is_ok());
    }
}
