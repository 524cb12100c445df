//! Authentication ports: password hashing, session tokens, and session storage.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use uuid::Uuid;

use crate::domain::UserId;

/// Server-held association between a client and a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: Uuid,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: UserId, ttl: TimeDelta) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            expires_at: Utc::now() + ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Claims carried by a signed session token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub session_id: Uuid,
    pub user_id: UserId,
    pub exp: i64,
}

/// Token service trait: signs session references handed to clients.
pub trait TokenService: Send + Sync {
    /// Sign a token referencing the given session.
    fn issue(&self, session: &Session) -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Lifetime of issued tokens, also used for the session record.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Storage for live sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, session: Session);

    /// Look up a live session. Expired sessions are treated as absent.
    async fn get(&self, id: Uuid) -> Option<Session>;

    /// Remove a session. Removing an unknown session is not an error.
    async fn remove(&self, id: Uuid);
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Hashing error: {0}")]
    HashingError(String),
}
