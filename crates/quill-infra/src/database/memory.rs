//! In-memory store - used when no database is reachable, and in tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::domain::{
    Comment, CommentId, NewComment, NewPost, NewUser, Post, PostChanges, PostId, Role, User,
    UserId,
};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, CommentRepository, PostRepository, UserRepository};

#[derive(Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    posts: BTreeMap<PostId, Post>,
    comments: BTreeMap<CommentId, Comment>,
}

/// Next id after the current maximum, so the highest freed id can be reused.
fn next_id<V>(table: &BTreeMap<i32, V>) -> i32 {
    table.keys().next_back().map_or(1, |last| last + 1)
}

/// Three tables behind a single async RwLock, enforcing the same
/// uniqueness and referential rules as the SQL schema.
///
/// Note: Data is lost on process restart.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> Arc<InMemoryUserRepository> {
        Arc::new(InMemoryUserRepository(self.clone()))
    }

    pub fn posts(&self) -> Arc<InMemoryPostRepository> {
        Arc::new(InMemoryPostRepository(self.clone()))
    }

    pub fn comments(&self) -> Arc<InMemoryCommentRepository> {
        Arc::new(InMemoryCommentRepository(self.clone()))
    }
}

pub struct InMemoryUserRepository(InMemoryStore);

pub struct InMemoryPostRepository(InMemoryStore);

pub struct InMemoryCommentRepository(InMemoryStore);

#[async_trait]
impl BaseRepository<User, UserId> for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError> {
        Ok(self.0.tables.read().await.users.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.0.tables.read().await.users.values().cloned().collect())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let tables = self.0.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let mut tables = self.0.tables.write().await;

        if tables.users.values().any(|u| u.email == new_user.email) {
            return Err(RepoError::Constraint("users.email".to_string()));
        }

        let user = User {
            id: next_id(&tables.users),
            email: new_user.email,
            username: new_user.username,
            password_hash: new_user.password_hash,
            role: Role::seed(tables.users.len() as u64),
        };
        tables.users.insert(user.id, user.clone());

        Ok(user)
    }
}

#[async_trait]
impl BaseRepository<Post, PostId> for InMemoryPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        Ok(self.0.tables.read().await.posts.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.0.tables.read().await.posts.values().cloned().collect())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let mut tables = self.0.tables.write().await;

        if !tables.users.contains_key(&new_post.author_id) {
            return Err(RepoError::Constraint("posts.author_id".to_string()));
        }

        let post = Post {
            id: next_id(&tables.posts),
            author_id: new_post.author_id,
            title: new_post.fields.title,
            subtitle: new_post.fields.subtitle,
            date: new_post.date,
            body: new_post.fields.body,
            img_url: new_post.fields.img_url,
        };
        tables.posts.insert(post.id, post.clone());

        Ok(post)
    }

    async fn update(&self, id: PostId, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        let mut tables = self.0.tables.write().await;

        if let Some(author_id) = changes.author_id {
            if !tables.users.contains_key(&author_id) {
                return Err(RepoError::Constraint("posts.author_id".to_string()));
            }
        }

        let Some(post) = tables.posts.get_mut(&id) else {
            return Ok(None);
        };
        post.apply(changes);

        Ok(Some(post.clone()))
    }

    async fn delete(&self, id: PostId) -> Result<bool, RepoError> {
        let mut tables = self.0.tables.write().await;

        if tables.posts.remove(&id).is_none() {
            return Ok(false);
        }
        tables.comments.retain(|_, c| c.post_id != id);

        Ok(true)
    }
}

#[async_trait]
impl BaseRepository<Comment, CommentId> for InMemoryCommentRepository {
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, RepoError> {
        Ok(self.0.tables.read().await.comments.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Comment>, RepoError> {
        Ok(self.0.tables.read().await.comments.values().cloned().collect())
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn create(&self, new_comment: NewComment) -> Result<Comment, RepoError> {
        let mut tables = self.0.tables.write().await;

        if !tables.posts.contains_key(&new_comment.post_id) {
            return Err(RepoError::Constraint("comments.post_id".to_string()));
        }
        if !tables.users.contains_key(&new_comment.author_id) {
            return Err(RepoError::Constraint("comments.author_id".to_string()));
        }

        let comment = Comment {
            id: next_id(&tables.comments),
            text: new_comment.text,
            author_id: new_comment.author_id,
            post_id: new_comment.post_id,
        };
        tables.comments.insert(comment.id, comment.clone());

        Ok(comment)
    }

    async fn find_by_post_id(&self, post_id: PostId) -> Result<Vec<Comment>, RepoError> {
        let tables = self.0.tables.read().await;
        Ok(tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::domain::PostFields;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            username: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    fn new_post(author_id: UserId) -> NewPost {
        NewPost {
            author_id,
            date: "January 1, 2026".to_string(),
            fields: PostFields {
                title: "t".to_string(),
                subtitle: "s".to_string(),
                body: "b".to_string(),
                img_url: "u".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_first_user_is_admin() {
        let store = InMemoryStore::new();
        let users = store.users();

        let first = users.create(new_user("a@x.io")).await.unwrap();
        let second = users.create(new_user("b@x.io")).await.unwrap();

        assert_eq!((first.id, first.role), (1, Role::Admin));
        assert_eq!((second.id, second.role), (2, Role::Author));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_a_constraint_error() {
        let store = InMemoryStore::new();
        let users = store.users();

        users.create(new_user("a@x.io")).await.unwrap();
        let err = users.create(new_user("a@x.io")).await.unwrap_err();

        assert!(matches!(err, RepoError::Constraint(_)));
        assert_eq!(users.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_comments() {
        let store = InMemoryStore::new();
        let author = store.users().create(new_user("a@x.io")).await.unwrap();
        let posts = store.posts();
        let comments = store.comments();

        let kept = posts.create(new_post(author.id)).await.unwrap();
        let doomed = posts.create(new_post(author.id)).await.unwrap();
        for post_id in [kept.id, doomed.id] {
            comments
                .create(NewComment {
                    text: "hi".to_string(),
                    author_id: author.id,
                    post_id,
                })
                .await
                .unwrap();
        }

        assert!(posts.delete(doomed.id).await.unwrap());
        assert!(!posts.delete(doomed.id).await.unwrap());

        let remaining = comments.find_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].post_id, kept.id);
    }

    #[tokio::test]
    async fn test_comment_requires_existing_post() {
        let store = InMemoryStore::new();
        let author = store.users().create(new_user("a@x.io")).await.unwrap();

        let err = store
            .comments()
            .create(NewComment {
                text: "hi".to_string(),
                author_id: author.id,
                post_id: 99,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_highest_freed_id_is_reused() {
        let store = InMemoryStore::new();
        let author = store.users().create(new_user("a@x.io")).await.unwrap();
        let posts = store.posts();

        posts.create(new_post(author.id)).await.unwrap();
        let second = posts.create(new_post(author.id)).await.unwrap();
        posts.delete(second.id).await.unwrap();

        let third = posts.create(new_post(author.id)).await.unwrap();
        assert_eq!(third.id, second.id);
    }

    #[tokio::test]
    async fn test_update_missing_post_returns_none() {
        let store = InMemoryStore::new();
        let changes = PostChanges {
            author_id: None,
            fields: new_post(1).fields,
        };

        assert_eq!(store.posts().update(5, changes).await.unwrap(), None);
    }
}
