//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::application::{LoginOutput, RegisterOutput};

// ============================================================================
// Request
// ============================================================================

/// Register and login request body
///
/// Both fields are optional at the wire level; absence is reported the same
/// way as an empty string.
#[derive(Clone, Default, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl CredentialsRequest {
    /// Split into `(username, password)`, empty where absent
    pub fn into_parts(self) -> (String, String) {
        (
            self.username.unwrap_or_default(),
            self.password.unwrap_or_default(),
        )
    }
}

impl fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

// ============================================================================
// Response
// ============================================================================

/// Response body shared by both endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
}

impl AuthResponse {
    pub fn ok(message: impl Into<String>, user: UserSummary) -> Self {
        Self {
            success: true,
            message: message.into(),
            user: Some(user),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            user: None,
        }
    }
}

/// Non-secret account summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
}

impl From<RegisterOutput> for UserSummary {
    fn from(output: RegisterOutput) -> Self {
        Self {
            id: output.account_id.get(),
            username: output.user_name.into_inner(),
        }
    }
}

impl From<LoginOutput> for UserSummary {
    fn from(output: LoginOutput) -> Self {
        Self {
            id: output.account_id.get(),
            username: output.user_name.into_inner(),
        }
    }
}
