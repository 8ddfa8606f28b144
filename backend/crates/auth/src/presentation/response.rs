//! Error responses
//!
//! An [`AuthError`] alone does not say which endpoint failed, and the public
//! message for an internal failure differs per endpoint. [`ApiError`] pairs
//! the two.

use axum::Json;
use axum::response::{IntoResponse, Response};

use crate::error::AuthError;
use crate::presentation::dto::AuthResponse;

/// Endpoint an error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Register,
    Login,
}

impl Operation {
    /// Public message for an internal failure
    pub fn internal_message(self) -> &'static str {
        match self {
            Operation::Register => "Error processing registration",
            Operation::Login => "Error during login",
        }
    }
}

/// Handler error
#[derive(Debug)]
pub struct ApiError {
    pub operation: Operation,
    pub error: AuthError,
}

impl ApiError {
    pub fn new(operation: Operation, error: AuthError) -> Self {
        Self { operation, error }
    }

    /// Message safe to show to clients
    pub fn public_message(&self) -> String {
        match &self.error {
            AuthError::Internal(_) => self.operation.internal_message().to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.error.log();
        let status = self.error.status_code();
        (status, Json(AuthResponse::failure(self.public_message()))).into_response()
    }
}
