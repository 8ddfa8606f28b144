//! Auth Error Types
//!
//! Two layers of errors:
//! - [`StoreError`] is what a credential store reports.
//! - [`AuthError`] is the outcome classification the service hands to the
//!   HTTP layer. Its `Display` text is safe to show to clients except for
//!   `Internal`, whose detail is only logged.

use std::time::Duration;

use axum::http::StatusCode;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

// ============================================================================
// Store errors
// ============================================================================

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Credential store failures
///
/// Everything except `DuplicateUsername` is a storage failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage layer rejected the insert on its uniqueness constraint
    #[error("Username already exists")]
    DuplicateUsername,

    /// The operation did not finish within the configured bound
    #[error("Storage operation timed out after {0:?}")]
    Timeout(Duration),

    /// Any other database error
    #[error("Storage failure: {0}")]
    Storage(#[source] sqlx::Error),

    /// A stored row could not be turned back into an account
    #[error("Corrupt account record: {0}")]
    CorruptRecord(String),
}

impl StoreError {
    /// True for every variant that is not a business-rule conflict
    pub fn is_storage_failure(&self) -> bool {
        !matches!(self, StoreError::DuplicateUsername)
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::DuplicateUsername
            }
            _ => StoreError::Storage(err),
        }
    }
}

// ============================================================================
// Service errors
// ============================================================================

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth outcome failures
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password missing or empty
    #[error("Missing username or password")]
    InvalidInput,

    /// Registration hit an existing username
    #[error("Username already exists")]
    UsernameTaken,

    /// Unknown username or wrong password, deliberately indistinguishable
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Storage or hashing failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    ///
    /// A taken username is reported as 400 rather than 409 to match the
    /// existing clients.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::UsernameTaken => StatusCode::BAD_REQUEST,
            other => StatusCode::from_u16(other.kind().status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidInput => ErrorKind::BadRequest,
            AuthError::UsernameTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        if self.kind().is_server_error() {
            tracing::error!(error = %self, "Auth internal error");
            return;
        }

        match self {
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        if err.is_storage_failure() {
            AuthError::Internal(err.to_string())
        } else {
            AuthError::UsernameTaken
        }
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::InvalidInput,
            _ => AuthError::Internal(err.message().to_string()),
        }
    }
}
