//! Application state - shared across all handlers.

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use quill_core::ports::{
    AuthError, CommentRepository, ContactNotifier, PasswordService, PostRepository, RolePolicy,
    SessionStore, TokenService, UserRepository,
};
use quill_core::services::{AuthService, ContactService, ContentService};
use quill_infra::database::connect;
use quill_infra::{
    Argon2PasswordService, HttpMailRelay, InMemorySessionStore, InMemoryStore, JwtTokenService,
    LogNotifier, SqlCommentRepository, SqlPostRepository, SqlUserRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub content: Arc<ContentService>,
    pub contact: Arc<ContactService>,
    pub secure_cookies: bool,
}

/// The three repositories, all backed by the same store.
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        let store = InMemoryStore::new();
        Self {
            users: store.users(),
            posts: store.posts(),
            comments: store.comments(),
        }
    }

    /// Connect to the configured database, falling back to memory if it is unreachable.
    async fn connect(config: &AppConfig) -> Self {
        let conn = match connect(&config.database).await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                return Self::in_memory();
            }
        };

        if config.run_migrations {
            if let Err(e) = Migrator::up(&conn, None).await {
                tracing::error!("Failed to apply migrations: {}. Using in-memory fallback.", e);
                return Self::in_memory();
            }
            tracing::info!("Database migrations applied");
        }

        let conn = Arc::new(conn);
        Self {
            users: Arc::new(SqlUserRepository::new(conn.clone())),
            posts: Arc::new(SqlPostRepository::new(conn.clone())),
            comments: Arc::new(SqlCommentRepository::new(conn)),
        }
    }
}

/// Adapters behind the auth and contact ports.
pub struct Adapters {
    pub passwords: Arc<dyn PasswordService>,
    pub tokens: Arc<dyn TokenService>,
    pub sessions: Arc<dyn SessionStore>,
    pub notifier: Arc<dyn ContactNotifier>,
}

impl AppState {
    /// Build the application state from configuration.
    pub async fn new(config: &AppConfig) -> Result<Self, AuthError> {
        let repositories = Repositories::connect(config).await;

        let notifier: Arc<dyn ContactNotifier> = match &config.mail {
            Some(mail) => {
                tracing::info!("Contact messages go through the mail relay");
                Arc::new(HttpMailRelay::new(mail.clone()))
            }
            None => {
                tracing::warn!("MAIL_RELAY_URL not set. Contact messages will only be logged.");
                Arc::new(LogNotifier::new(config.contact_recipient.clone()))
            }
        };

        let adapters = Adapters {
            passwords: Arc::new(Argon2PasswordService::new(&config.password)?),
            tokens: Arc::new(JwtTokenService::new(config.session.clone())),
            sessions: Arc::new(InMemorySessionStore::new()),
            notifier,
        };

        let state = Self::assemble(repositories, adapters, config.secure_cookies);
        tracing::info!("Application state initialized");
        Ok(state)
    }

    /// Wire the services; identity is passed into every call, never stored here.
    pub fn assemble(repositories: Repositories, adapters: Adapters, secure_cookies: bool) -> Self {
        let policy = Arc::new(RolePolicy);

        let auth = AuthService::new(
            repositories.users.clone(),
            adapters.passwords,
            adapters.tokens,
            adapters.sessions,
            policy.clone(),
        );
        let content = ContentService::new(
            repositories.users,
            repositories.posts,
            repositories.comments,
            policy,
        );

        Self {
            auth: Arc::new(auth),
            content: Arc::new(content),
            contact: Arc::new(ContactService::new(adapters.notifier)),
            secure_cookies,
        }
    }
}
