//! # Quill Core
//!
//! The domain layer of the Quill blog.
//! This crate contains the entities, the authorization rules, and the
//! application services, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
