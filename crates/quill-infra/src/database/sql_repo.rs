//! SeaORM repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseBackend, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use quill_core::domain::{
    Comment, NewComment, NewPost, NewUser, Post, PostChanges, PostId, Role, User,
};
use quill_core::error::RepoError;
use quill_core::ports::{CommentRepository, PostRepository, UserRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::sql_base::{SqlBaseRepository, query_error, write_error};

/// SQL user repository.
pub type SqlUserRepository = SqlBaseRepository<UserEntity>;

/// SQL post repository.
pub type SqlPostRepository = SqlBaseRepository<PostEntity>;

/// SQL comment repository.
pub type SqlCommentRepository = SqlBaseRepository<CommentEntity>;

/// Mask email for logging to avoid PII in logs.
pub(crate) fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = match local.chars().next() {
                Some(first) if local.chars().count() > 1 => format!("{first}***"),
                _ => "***".to_string(),
            };
            format!("{masked_local}{domain}")
        }
        None => "***".to_string(),
    }
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let txn = self.db.begin().await.map_err(query_error)?;

        // Serialise concurrent first registrations so only one can seed the admin.
        if txn.get_database_backend() == DatabaseBackend::Postgres {
            txn.execute_unprepared("LOCK TABLE users IN SHARE ROW EXCLUSIVE MODE")
                .await
                .map_err(query_error)?;
        }

        let existing = UserEntity::find().count(&txn).await.map_err(query_error)?;
        let role = Role::seed(existing);

        let model = user::ActiveModel::from_new(new_user, role)
            .insert(&txn)
            .await
            .map_err(write_error)?;
        txn.commit().await.map_err(query_error)?;

        Ok(model.into())
    }
}

#[async_trait]
impl PostRepository for SqlPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(new_post)
            .insert(self.db.as_ref())
            .await
            .map_err(write_error)?;

        Ok(model.into())
    }

    async fn update(&self, id: PostId, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        let txn = self.db.begin().await.map_err(query_error)?;

        // Row lock on Postgres; SQLite serialises writers on its own.
        let Some(current) = PostEntity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(query_error)?
        else {
            return Ok(None);
        };

        let mut active: post::ActiveModel = current.into();
        active.apply(changes);
        let model = active.update(&txn).await.map_err(write_error)?;
        txn.commit().await.map_err(query_error)?;

        Ok(Some(model.into()))
    }

    async fn delete(&self, id: PostId) -> Result<bool, RepoError> {
        let txn = self.db.begin().await.map_err(query_error)?;

        let Some(current) = PostEntity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(query_error)?
        else {
            return Ok(false);
        };

        CommentEntity::delete_many()
            .filter(comment::Column::PostId.eq(id))
            .exec(&txn)
            .await
            .map_err(query_error)?;
        current.delete(&txn).await.map_err(query_error)?;
        txn.commit().await.map_err(query_error)?;

        Ok(true)
    }
}

#[async_trait]
impl CommentRepository for SqlCommentRepository {
    async fn create(&self, new_comment: NewComment) -> Result<Comment, RepoError> {
        let model = comment::ActiveModel::from(new_comment)
            .insert(self.db.as_ref())
            .await
            .map_err(write_error)?;

        Ok(model.into())
    }

    async fn find_by_post_id(&self, post_id: PostId) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::mask_email;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@example.com"), "a***@example.com");
        assert_eq!(mask_email("a@example.com"), "***@example.com");
        assert_eq!(mask_email("no-at-sign"), "***");
    }
}
