//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures surfaced by the services.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("User does not exist")]
    UserNotFound,

    #[error("Invalid password")]
    InvalidCredentials,

    #[error("Administrator access required")]
    Forbidden,

    #[error("You must be logged in")]
    Unauthorized,

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: i32 },

    #[error("Message could not be delivered: {0}")]
    Transport(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Repository(#[from] RepoError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn post_not_found(id: i32) -> Self {
        Self::NotFound {
            entity_type: "Post",
            id,
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
