//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Account entity, value objects, store trait
//! - `application/` - Register/login use cases and the service facade
//! - `infra/` - SQLite and in-memory credential stores
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Account registration with a unique, case-sensitive username
//! - Login against the stored hash; unknown user and wrong password are
//!   indistinguishable to the caller
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, fresh salt per account, optional pepper
//! - Plaintext passwords zeroized after use and never logged
//! - Username uniqueness enforced by the storage constraint, not by a
//!   check-then-insert in the service

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{AuthConfig, AuthService};
pub use domain::{Account, AccountStore};
pub use error::{AuthError, AuthResult, StoreError, StoreResult};
pub use infra::{MemoryAccountStore, SqliteAccountStore, StoreConfig};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
