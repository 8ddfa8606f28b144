//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use crate::application::{AuthService, LoginInput, RegisterInput};
use crate::domain::repository::AccountStore;
use crate::error::AuthError;
use crate::presentation::dto::{AuthResponse, CredentialsRequest};
use crate::presentation::response::{ApiError, Operation};

/// An unreadable body counts as missing credentials
fn credentials(
    body: Result<Json<CredentialsRequest>, JsonRejection>,
    operation: Operation,
) -> Result<(String, String), ApiError> {
    match body {
        Ok(Json(req)) => Ok(req.into_parts()),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected request body");
            Err(ApiError::new(operation, AuthError::InvalidInput))
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /register
pub async fn register<S>(
    State(service): State<AuthService<S>>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError>
where
    S: AccountStore + Sync + 'static,
{
    let (username, password) = credentials(body, Operation::Register)?;

    let output = service
        .register(RegisterInput { username, password })
        .await
        .map_err(|e| ApiError::new(Operation::Register, e))?;

    Ok(Json(AuthResponse::ok(
        "User registered successfully",
        output.into(),
    )))
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<S>(
    State(service): State<AuthService<S>>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError>
where
    S: AccountStore + Sync + 'static,
{
    let (username, password) = credentials(body, Operation::Login)?;

    let output = service
        .login(LoginInput { username, password })
        .await
        .map_err(|e| ApiError::new(Operation::Login, e))?;

    Ok(Json(AuthResponse::ok("Login successful", output.into())))
}
