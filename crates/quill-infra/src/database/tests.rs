use std::sync::Arc;

use sea_orm::{DatabaseBackend, MockDatabase};

use quill_core::domain::{NewPost, Post, PostFields, Role, User};
use quill_core::ports::{BaseRepository, CommentRepository, PostRepository, UserRepository};

use crate::database::entity::{comment, post, user};
use crate::database::sql_repo::{SqlCommentRepository, SqlPostRepository, SqlUserRepository};

fn post_model(id: i32, title: &str) -> post::Model {
    post::Model {
        id,
        author_id: 1,
        title: title.to_owned(),
        subtitle: "Sub".to_owned(),
        date: "October 17, 2026".to_owned(),
        body: "<p>x</p>".to_owned(),
        img_url: "http://i/1.png".to_owned(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Sqlite)
        .append_query_results([vec![post_model(4, "Test Post")]])
        .into_connection();

    let repo = SqlPostRepository::new(Arc::new(db));

    let result: Option<Post> = repo.find_by_id(4).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, 4);
    assert_eq!(post.date, "October 17, 2026");
}

#[tokio::test]
async fn test_find_all_posts() {
    let db = MockDatabase::new(DatabaseBackend::Sqlite)
        .append_query_results([vec![post_model(1, "First"), post_model(2, "Second")]])
        .into_connection();

    let repo = SqlPostRepository::new(Arc::new(db));

    let posts: Vec<Post> = repo.find_all().await.unwrap();

    let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["First", "Second"]);
}

#[tokio::test]
async fn test_find_user_by_email_maps_role() {
    let db = MockDatabase::new(DatabaseBackend::Sqlite)
        .append_query_results([vec![user::Model {
            id: 1,
            email: "admin@example.com".to_owned(),
            username: "admin".to_owned(),
            password_hash: "$argon2id$...".to_owned(),
            role: "admin".to_owned(),
        }]])
        .into_connection();

    let repo = SqlUserRepository::new(Arc::new(db));

    let found: User = repo
        .find_by_email("admin@example.com")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.id, 1);
    assert_eq!(found.role, Role::Admin);
}

#[tokio::test]
async fn test_unknown_role_text_is_not_admin() {
    let db = MockDatabase::new(DatabaseBackend::Sqlite)
        .append_query_results([vec![user::Model {
            id: 1,
            email: "x@example.com".to_owned(),
            username: "x".to_owned(),
            password_hash: String::new(),
            role: "superuser".to_owned(),
        }]])
        .into_connection();

    let repo = SqlUserRepository::new(Arc::new(db));

    let found: User = repo.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(found.role, Role::Author);
}

#[tokio::test]
async fn test_create_post_returns_inserted_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        // Postgres inserts use RETURNING, so the row comes back as a query result.
        .append_query_results([vec![post_model(9, "Hi")]])
        .into_connection();

    let repo = SqlPostRepository::new(Arc::new(db));

    let post = repo
        .create(NewPost {
            author_id: 1,
            date: "October 17, 2026".to_owned(),
            fields: PostFields {
                title: "Hi".to_owned(),
                subtitle: "Sub".to_owned(),
                body: "<p>x</p>".to_owned(),
                img_url: "http://i/1.png".to_owned(),
            },
        })
        .await
        .unwrap();

    assert_eq!(post.id, 9);
    assert_eq!(post.title, "Hi");
}

#[tokio::test]
async fn test_comments_for_post() {
    let db = MockDatabase::new(DatabaseBackend::Sqlite)
        .append_query_results([vec![
            comment::Model {
                id: 1,
                text: "first".to_owned(),
                author_id: 2,
                post_id: 3,
            },
            comment::Model {
                id: 2,
                text: "second".to_owned(),
                author_id: 1,
                post_id: 3,
            },
        ]])
        .into_connection();

    let repo = SqlCommentRepository::new(Arc::new(db));

    let comments = repo.find_by_post_id(3).await.unwrap();
    assert_eq!(comments.len(), 2);
    assert!(comments.iter().all(|c| c.post_id == 3));
}
