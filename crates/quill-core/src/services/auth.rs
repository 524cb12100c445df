//! Auth Service: registration, login, sessions, and the admin check.

use std::sync::{Arc, OnceLock};

use chrono::TimeDelta;

use crate::domain::{Identity, NewUser, Registration, User};
use crate::error::{DomainError, RepoError};
use crate::ports::{
    AuthError, AuthorizationPolicy, PasswordService, Session, SessionStore, TokenService,
    UserRepository,
};

/// Outcome of a successful registration or login.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub user: User,
    pub session: Session,
    /// Signed token the client presents on later requests.
    pub token: String,
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
    sessions: Arc<dyn SessionStore>,
    policy: Arc<dyn AuthorizationPolicy>,
    // Verified against when the email is unknown so both login failures cost one hash.
    dummy_hash: OnceLock<String>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
        sessions: Arc<dyn SessionStore>,
        policy: Arc<dyn AuthorizationPolicy>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
            sessions,
            policy,
            dummy_hash: OnceLock::new(),
        }
    }

    /// Create an account and sign it in.
    pub async fn register(&self, form: Registration) -> Result<SignedIn, DomainError> {
        form.validate()?;
        let email = form.email.trim().to_string();

        if self.users.find_by_email(&email).await?.is_some() {
            tracing::info!("Registration rejected: email already registered");
            return Err(DomainError::DuplicateEmail);
        }

        let password_hash = self.passwords.hash(&form.password).map_err(internal)?;

        let user = self
            .users
            .create(NewUser {
                email,
                username: form.username.trim().to_string(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                RepoError::Constraint(_) => DomainError::DuplicateEmail,
                other => DomainError::Repository(other),
            })?;

        tracing::info!(user_id = user.id, role = user.role.as_str(), "User registered");
        self.start_session(user).await
    }

    /// Verify credentials and sign the matching user in.
    pub async fn login(&self, email: &str, password: &str) -> Result<SignedIn, DomainError> {
        let Some(user) = self.users.find_by_email(email.trim()).await? else {
            let dummy = self.dummy_hash.get_or_init(|| {
                self.passwords
                    .hash("quill-timing-equaliser")
                    .unwrap_or_default()
            });
            let _ = self.passwords.verify(password, dummy);
            return Err(DomainError::UserNotFound);
        };

        let valid = self
            .passwords
            .verify(password, &user.password_hash)
            .map_err(internal)?;
        if !valid {
            tracing::info!(user_id = user.id, "Login rejected: invalid password");
            return Err(DomainError::InvalidCredentials);
        }

        tracing::info!(user_id = user.id, "User logged in");
        self.start_session(user).await
    }

    /// End the session referenced by `token`. Unknown or invalid tokens are ignored.
    pub async fn logout(&self, token: &str) {
        if let Ok(claims) = self.tokens.validate(token) {
            self.sessions.remove(claims.session_id).await;
            tracing::debug!(user_id = claims.user_id, "Session ended");
        }
    }

    /// Resolve the caller behind a presented token.
    ///
    /// Missing, malformed, expired, or revoked tokens resolve to `Anonymous`.
    pub async fn current_identity(&self, token: Option<&str>) -> Result<Identity, DomainError> {
        let Some(token) = token else {
            return Ok(Identity::Anonymous);
        };

        let claims = match self.tokens.validate(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unusable session token");
                return Ok(Identity::Anonymous);
            }
        };

        let Some(session) = self.sessions.get(claims.session_id).await else {
            return Ok(Identity::Anonymous);
        };
        if session.user_id != claims.user_id {
            return Ok(Identity::Anonymous);
        }

        Ok(self
            .users
            .find_by_id(session.user_id)
            .await?
            .map(Identity::User)
            .unwrap_or_default())
    }

    pub fn is_admin(&self, identity: &Identity) -> bool {
        self.policy.is_admin(identity)
    }

    pub fn session_seconds(&self) -> i64 {
        self.tokens.expiration_seconds()
    }

    async fn start_session(&self, user: User) -> Result<SignedIn, DomainError> {
        let session = Session::new(user.id, TimeDelta::seconds(self.tokens.expiration_seconds()));
        let token = self.tokens.issue(&session).map_err(internal)?;
        self.sessions.insert(session.clone()).await;

        Ok(SignedIn {
            user,
            session,
            token,
        })
    }
}

fn internal(err: AuthError) -> DomainError {
    DomainError::Internal(err.to_string())
}
