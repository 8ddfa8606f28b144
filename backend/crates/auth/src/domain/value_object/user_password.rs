//! User Password Value Object
//!
//! Domain wrappers around `platform::password`.
//!
//! - [`RawPassword`] is what the caller typed: non-empty, zeroized on drop,
//!   never printed.
//! - [`UserPassword`] is the Argon2id PHC string that gets stored. It is only
//!   ever checked through [`UserPassword::verify`].
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//! use platform::password::HashCost;
//!
//! let raw = RawPassword::new("s3cret".to_string()).unwrap();
//! let hashed = UserPassword::from_raw(&raw, None, &HashCost::testing()).unwrap();
//! assert!(hashed.verify(&raw, None).unwrap());
//! ```

use kernel::error::{
    app_error::{AppError, AppResult, ResultExt},
    kind::ErrorKind,
};
use platform::password::{ClearTextPassword, HashCost, HashedPassword, PasswordError};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// ## Errors
    /// `BadRequest` if the input is empty
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordError::Empty => AppError::bad_request("Missing username or password"),
            other => AppError::internal("Unexpected password error").with_source(other),
        })?;

        Ok(Self(clear_text))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password for database storage
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password with a fresh salt
    ///
    /// CPU-bound and deliberately slow. Async callers should run it on the
    /// blocking pool.
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>, cost: &HashCost) -> AppResult<Self> {
        let hashed = raw
            .0
            .hash(pepper, cost)
            .map_app_err(ErrorKind::InternalServerError, "Password hashing failed")?;

        Ok(Self(hashed))
    }

    /// Restore from a PHC string read back from storage
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string).map_app_err(
            ErrorKind::InternalServerError,
            "Invalid password hash in database",
        )?;

        Ok(Self(hashed))
    }

    /// Get PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this hash
    ///
    /// `Ok(false)` means the password does not match. `Err` means the check
    /// could not be performed.
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<bool> {
        self.0
            .verify(&raw.0, pepper)
            .map_app_err(ErrorKind::InternalServerError, "Password verification failed")
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

impl fmt::Display for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[HASHED_PASSWORD]")
    }
}

// ============================================================================
// Tests
// ============================================================================
