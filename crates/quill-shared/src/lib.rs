//! # Quill Shared
//!
//! Wire types shared between the server and any client of its HTTP API.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
