//! User Name Value Object
//!
//! The handle an account logs in with.
//!
//! ## Invariants
//! - Non-empty
//! - Stored and compared exactly as given: case-sensitive, no trimming,
//!   no normalization (`"Alice"` and `"alice"` are different accounts)

use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};

/// Validated user name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub struct UserName(String);

impl UserName {
    /// Create a user name from request input
    ///
    /// ## Errors
    /// `BadRequest` if the input is empty
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(AppError::bad_request("Missing username or password"));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
