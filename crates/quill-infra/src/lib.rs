//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! This crate contains the SQL store, the in-memory store, authentication
//! adapters, and the contact-mail notifiers.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory store and log notifier only
//! - `database` - SQLite/Postgres persistence via SeaORM
//! - `auth` - JWT session tokens + Argon2 password hashing
//! - `mail` - HTTP mail relay for contact messages

pub mod database;
pub mod notify;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use database::{DatabaseConfig, InMemoryStore};
pub use notify::LogNotifier;

#[cfg(feature = "auth")]
pub use auth::{
    Argon2PasswordService, InMemorySessionStore, JwtConfig, JwtTokenService, PasswordConfig,
};

#[cfg(feature = "database")]
pub use database::{SqlCommentRepository, SqlPostRepository, SqlUserRepository};

#[cfg(feature = "mail")]
pub use notify::{HttpMailRelay, MailConfig};
