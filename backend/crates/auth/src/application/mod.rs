//! Application Layer
//!
//! Use cases and the service facade the HTTP layer talks to.

mod credentials;

pub mod config;
pub mod login;
pub mod register;
pub mod service;

// Re-exports
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use service::AuthService;
