//! Application services - the operations the web layer calls.
//!
//! Every service receives the caller's [`Identity`](crate::domain::Identity)
//! explicitly; nothing is read from ambient request state.

mod auth;
mod contact;
mod content;

pub use auth::{AuthService, SignedIn};
pub use contact::ContactService;
pub use content::{ContentService, PostSummary, PostThread, ThreadComment};
