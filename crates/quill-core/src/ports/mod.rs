//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod notification;
mod policy;
mod repository;

pub use auth::{AuthError, PasswordService, Session, SessionStore, TokenClaims, TokenService};
pub use notification::{ContactNotifier, NotifyError};
pub use policy::{AuthorizationPolicy, RolePolicy};
pub use repository::{BaseRepository, CommentRepository, PostRepository, UserRepository};
