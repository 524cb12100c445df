//! Domain entities - the core business objects.

mod comment;
mod contact;
mod identity;
mod post;
mod user;

pub use comment::{Comment, CommentId, NewComment};
pub use contact::ContactMessage;
pub use identity::Identity;
pub use post::{NewPost, Post, PostChanges, PostFields, PostId, PostUpdate, publish_date};
pub use user::{NewUser, Registration, Role, User, UserId};

use crate::error::DomainError;

/// Rejects blank required form fields.
pub(crate) fn require(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} is required")));
    }
    Ok(())
}
