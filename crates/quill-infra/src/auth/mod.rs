//! Authentication implementations.

mod jwt;
mod password;
mod session;

pub use jwt::{JwtConfig, JwtTokenService};
pub use password::{Argon2PasswordService, PasswordConfig};
pub use session::InMemorySessionStore;
