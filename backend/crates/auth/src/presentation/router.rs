//! Auth Router

use axum::{Router, routing::post};

use crate::application::AuthService;
use crate::domain::repository::AccountStore;
use crate::presentation::handlers;

/// Create the auth router for any account store
///
/// Routes are relative; the binary decides where to mount them.
pub fn auth_router<S>(service: AuthService<S>) -> Router
where
    S: AccountStore + Sync + 'static,
{
    Router::new()
        .route("/register", post(handlers::register::<S>))
        .route("/login", post(handlers::login::<S>))
        .with_state(service)
}
