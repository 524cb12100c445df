use async_trait::async_trait;

use crate::domain::{
    Comment, CommentId, NewComment, NewPost, NewUser, Post, PostChanges, PostId, User, UserId,
};
use crate::error::RepoError;

/// Generic repository trait defining the shared read operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// All entities, ordered by ID.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, UserId> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Insert a user, assigning `Role::seed` atomically with the insert.
    ///
    /// Returns `RepoError::Constraint` when the email is already taken.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, PostId> {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Read-modify-write of one row as a single atomic unit.
    /// Returns `None` when the post does not exist.
    async fn update(&self, id: PostId, changes: PostChanges) -> Result<Option<Post>, RepoError>;

    /// Remove a post together with its comments.
    /// Returns `false` when the post does not exist.
    async fn delete(&self, id: PostId) -> Result<bool, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, CommentId> {
    /// Returns `RepoError::Constraint` when the post or author is gone.
    async fn create(&self, comment: NewComment) -> Result<Comment, RepoError>;

    async fn find_by_post_id(&self, post_id: PostId) -> Result<Vec<Comment>, RepoError>;
}
