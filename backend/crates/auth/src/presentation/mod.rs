//! Presentation Layer
//!
//! HTTP handlers, DTOs, error responses and router.

pub mod dto;
pub mod handlers;
pub mod response;
pub mod router;

pub use response::{ApiError, Operation};
pub use router::auth_router;
