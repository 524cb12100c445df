//! Persistence layer: SeaORM repositories and the in-memory fallback.

mod connections;
pub mod memory;

#[cfg(feature = "database")]
pub mod entity;
#[cfg(feature = "database")]
mod sql_base;
#[cfg(feature = "database")]
pub mod sql_repo;

pub use connections::DatabaseConfig;
pub use memory::InMemoryStore;

#[cfg(feature = "database")]
pub use connections::connect;
#[cfg(feature = "database")]
pub use sql_repo::{SqlCommentRepository, SqlPostRepository, SqlUserRepository};

#[cfg(feature = "database")]
#[cfg(test)]
mod tests;
