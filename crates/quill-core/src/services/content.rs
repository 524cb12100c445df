//! Content Service: posts and comments, gated by the authorization policy.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Local;

use crate::domain::{
    Comment, Identity, NewComment, NewPost, Post, PostChanges, PostFields, PostId, PostUpdate,
    User, UserId, publish_date, require,
};
use crate::error::{DomainError, RepoError};
use crate::ports::{AuthorizationPolicy, CommentRepository, PostRepository, UserRepository};

/// A post and its author, as listed on the home page.
#[derive(Debug, Clone)]
pub struct PostSummary {
    pub post: Post,
    pub author: Option<User>,
}

/// A post with its comments, as shown on the post page.
#[derive(Debug, Clone)]
pub struct PostThread {
    pub post: Post,
    pub author: Option<User>,
    pub comments: Vec<ThreadComment>,
}

#[derive(Debug, Clone)]
pub struct ThreadComment {
    pub comment: Comment,
    pub author: Option<User>,
}

pub struct ContentService {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    policy: Arc<dyn AuthorizationPolicy>,
}

impl ContentService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        policy: Arc<dyn AuthorizationPolicy>,
    ) -> Self {
        Self {
            users,
            posts,
            comments,
            policy,
        }
    }

    /// Every post, ordered by id. Public.
    pub async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_all().await?)
    }

    /// Every post with its author's account, for the home page.
    pub async fn list_summaries(&self) -> Result<Vec<PostSummary>, DomainError> {
        let posts = self.list_posts().await?;
        let authors = self.authors(posts.iter().map(|p| p.author_id)).await?;

        Ok(posts
            .into_iter()
            .map(|post| PostSummary {
                author: authors.get(&post.author_id).cloned().flatten(),
                post,
            })
            .collect())
    }

    pub async fn get_post(&self, id: PostId) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    /// The post page: post, its author, and its comments with their authors.
    pub async fn get_thread(&self, id: PostId) -> Result<PostThread, DomainError> {
        let post = self.get_post(id).await?;
        let comments = self.comments.find_by_post_id(id).await?;

        let authors = self
            .authors(std::iter::once(post.author_id).chain(comments.iter().map(|c| c.author_id)))
            .await?;

        let comments = comments
            .into_iter()
            .map(|comment| ThreadComment {
                author: authors.get(&comment.author_id).cloned().flatten(),
                comment,
            })
            .collect();

        Ok(PostThread {
            author: authors.get(&post.author_id).cloned().flatten(),
            post,
            comments,
        })
    }

    pub async fn create_post(
        &self,
        identity: &Identity,
        fields: PostFields,
    ) -> Result<Post, DomainError> {
        let admin = self.require_admin(identity, "create_post")?;
        fields.validate()?;

        let post = self
            .posts
            .create(NewPost {
                author_id: admin.id,
                date: publish_date(Local::now().date_naive()),
                fields,
            })
            .await?;

        tracing::info!(post_id = post.id, "Post created");
        Ok(post)
    }

    /// Current values of a post for the edit form. Admin only.
    pub async fn post_form(&self, identity: &Identity, id: PostId) -> Result<Post, DomainError> {
        self.require_admin(identity, "post_form")?;
        self.get_post(id).await
    }

    /// Overwrite the editable fields of a post; the publish date is kept.
    ///
    /// The author is replaced only when the submission names one, and that
    /// user must exist.
    pub async fn update_post(
        &self,
        identity: &Identity,
        id: PostId,
        update: PostUpdate,
    ) -> Result<Post, DomainError> {
        self.require_admin(identity, "update_post")?;
        update.fields.validate()?;

        if let Some(author_id) = update.author_id {
            if self.users.find_by_id(author_id).await?.is_none() {
                return Err(DomainError::Validation(format!(
                    "author {author_id} does not exist"
                )));
            }
        }

        let changes = PostChanges {
            author_id: update.author_id,
            fields: update.fields,
        };
        let post = self
            .posts
            .update(id, changes)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;

        tracing::info!(post_id = post.id, "Post updated");
        Ok(post)
    }

    /// Delete a post and, with it, its comments.
    pub async fn delete_post(&self, identity: &Identity, id: PostId) -> Result<(), DomainError> {
        self.require_admin(identity, "delete_post")?;

        if !self.posts.delete(id).await? {
            return Err(DomainError::post_not_found(id));
        }

        tracing::info!(post_id = id, "Post deleted");
        Ok(())
    }

    pub async fn add_comment(
        &self,
        identity: &Identity,
        post_id: PostId,
        text: &str,
    ) -> Result<Comment, DomainError> {
        let author = match identity {
            Identity::User(user) if self.policy.can_comment(identity) => user,
            _ => return Err(DomainError::Unauthorized),
        };
        require("comment", text)?;

        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(DomainError::post_not_found(post_id));
        }

        let comment = self
            .comments
            .create(NewComment {
                text: text.to_string(),
                author_id: author.id,
                post_id,
            })
            .await
            .map_err(|e| match e {
                // The post was deleted between the check and the insert.
                RepoError::Constraint(_) => DomainError::post_not_found(post_id),
                other => DomainError::Repository(other),
            })?;

        tracing::info!(comment_id = comment.id, post_id, "Comment added");
        Ok(comment)
    }

    /// Looks each distinct user up once. Deleted accounts map to `None`.
    async fn authors(
        &self,
        ids: impl IntoIterator<Item = UserId>,
    ) -> Result<HashMap<UserId, Option<User>>, DomainError> {
        let mut authors = HashMap::new();
        for id in ids {
            if !authors.contains_key(&id) {
                let user = self.users.find_by_id(id).await?;
                authors.insert(id, user);
            }
        }
        Ok(authors)
    }

    fn require_admin<'a>(
        &self,
        identity: &'a Identity,
        operation: &'static str,
    ) -> Result<&'a User, DomainError> {
        match identity.user() {
            Some(user) if self.policy.is_admin(identity) => Ok(user),
            _ => {
                tracing::warn!(
                    operation,
                    user_id = ?identity.user_id(),
                    "Rejected non-admin attempt"
                );
                Err(DomainError::Forbidden)
            }
        }
    }
}
