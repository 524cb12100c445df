use serde::{Deserialize, Serialize};

use super::require;
use crate::error::DomainError;

pub type UserId = i32;

/// Authorization role stored on every user row.
///
/// Exactly one `Admin` exists: the first account ever registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Author,
}

impl Role {
    /// Role for a new account given how many users already exist.
    ///
    /// Stores must evaluate this under the same lock or transaction as the insert.
    pub fn seed(existing_users: u64) -> Self {
        if existing_users == 0 {
            Role::Admin
        } else {
            Role::Author
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Author => "author",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Role::Admin),
            "author" => Some(Role::Author),
            _ => None,
        }
    }
}

/// User entity - a registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// A user row about to be inserted. The store assigns id and role.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

/// Registration form as submitted by a visitor.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl Registration {
    pub fn validate(&self) -> Result<(), DomainError> {
        require("email", &self.email)?;
        require("username", &self.username)?;
        require("password", &self.password)?;
        if !self.email.contains('@') {
            return Err(DomainError::Validation(
                "email must be a valid address".to_string(),
            ));
        }
        Ok(())
    }
}
