//! Error handling - maps domain failures to RFC 7807 responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header};
use quill_core::DomainError;
use quill_shared::ErrorResponse;

pub const LOGIN_PATH: &str = "/login";

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("User does not exist")]
    UserNotFound,

    #[error("Invalid password")]
    InvalidCredentials,

    #[error("Login required: {0}")]
    LoginRequired(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Delivery failed: {0}")]
    Transport(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Login-related failures send the client back to the login page.
    fn redirect(&self) -> Option<&'static str> {
        match self {
            AppError::DuplicateEmail
            | AppError::UserNotFound
            | AppError::InvalidCredentials
            | AppError::LoginRequired(_) => Some(LOGIN_PATH),
            _ => None,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::UserNotFound | AppError::InvalidCredentials | AppError::LoginRequired(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Transport(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::Validation(detail) => ErrorResponse::unprocessable(detail),
            AppError::DuplicateEmail => {
                ErrorResponse::conflict("Email already registered, login instead")
            }
            AppError::UserNotFound => ErrorResponse::unauthorized("User does not exist"),
            AppError::InvalidCredentials => ErrorResponse::unauthorized("Invalid password"),
            AppError::LoginRequired(detail) => ErrorResponse::unauthorized(detail),
            AppError::Forbidden => ErrorResponse::forbidden(),
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::Transport(_) => {
                ErrorResponse::bad_gateway("Your message could not be sent. Please try again later.")
            }
            AppError::Internal(detail) => {
                // Log internal errors
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        let mut response = HttpResponse::build(self.status_code());
        match self.redirect() {
            Some(location) => response
                .insert_header((header::LOCATION, location))
                .json(error.with_redirect(location)),
            None => response.json(error),
        }
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::DuplicateEmail => AppError::DuplicateEmail,
            DomainError::UserNotFound => AppError::UserNotFound,
            DomainError::InvalidCredentials => AppError::InvalidCredentials,
            DomainError::Unauthorized => {
                AppError::LoginRequired("You must be logged in to make comments".to_string())
            }
            DomainError::Forbidden => AppError::Forbidden,
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity_type, id))
            }
            DomainError::Transport(msg) => {
                tracing::warn!("Mail transport error: {}", msg);
                AppError::Transport(msg)
            }
            DomainError::Repository(e) => {
                tracing::error!("Database error: {}", e);
                AppError::Internal("Database error".to_string())
            }
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::Forbidden, StatusCode::FORBIDDEN),
            (DomainError::Unauthorized, StatusCode::UNAUTHORIZED),
            (DomainError::DuplicateEmail, StatusCode::CONFLICT),
            (DomainError::post_not_found(3), StatusCode::NOT_FOUND),
            (
                DomainError::Validation("title is required".to_string()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                DomainError::Transport("refused".to_string()),
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (domain, status) in cases {
            assert_eq!(AppError::from(domain).status_code(), status);
        }
    }

    #[test]
    fn test_login_failures_point_to_login_page() {
        let response = AppError::from(DomainError::Unauthorized).error_response();

        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            LOGIN_PATH
        );
        assert!(AppError::Forbidden.error_response().headers().get(header::LOCATION).is_none());
    }
}
