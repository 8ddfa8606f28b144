//! Password Hashing and Verification
//!
//! Salted one-way password handling with:
//! - Argon2id hashing (memory-hard, recommended by OWASP)
//! - Fresh random salt per hash, embedded in the PHC string
//! - Verification through Argon2's own constant-time verify
//! - Zeroization of clear text and peppered buffers
//!
//! Hashes are self-describing: the algorithm, version, cost parameters and
//! salt travel inside the PHC string, so verification needs nothing else
//! except the optional pepper.

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::{self, SaltString},
};
use rand::rngs::OsRng;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

// ============================================================================
// Error Types
// ============================================================================

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Password is the empty string
    #[error("Password cannot be empty")]
    Empty,

    /// Argon2 rejected the cost parameters
    #[error("Invalid hashing parameters: {0}")]
    InvalidCost(String),

    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Stored hash is not a valid PHC string
    #[error("Invalid password hash format")]
    InvalidHashFormat,

    /// Verification failed for a reason other than a mismatch
    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}

// ============================================================================
// Hash Cost
// ============================================================================

/// Argon2id cost parameters used when producing new hashes
///
/// Only affects hashing. Verification always uses the parameters stored in
/// the hash being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory size in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl Default for HashCost {
    /// OWASP recommended Argon2id parameters: m=19456 (19 MiB), t=2, p=1
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl HashCost {
    /// Cheap parameters for tests. Never use in production.
    pub const fn testing() -> Self {
        Self {
            memory_kib: 256,
            iterations: 1,
            parallelism: 1,
        }
    }

    fn hasher(&self) -> Result<Argon2<'static>, PasswordError> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| PasswordError::InvalidCost(e.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// ## Examples
/// ```rust
/// use platform::password::{ClearTextPassword, HashCost};
///
/// let password = ClearTextPassword::new("s3cret".to_string()).unwrap();
/// let hashed = password.hash(None, &HashCost::testing()).unwrap();
/// assert!(hashed.verify(&password, None).unwrap());
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Accept any non-empty password
    ///
    /// The bytes are kept exactly as given; two strings that merely look
    /// alike are different passwords. No complexity rules are applied.
    pub fn new(raw: String) -> Result<Self, PasswordError> {
        if raw.is_empty() {
            return Err(PasswordError::Empty);
        }

        Ok(Self(raw))
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(self.0.as_bytes().to_vec());
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }

    /// Hash the password using Argon2id with a fresh random salt
    ///
    /// ## Arguments
    /// * `pepper` - Optional application-wide secret appended before hashing
    /// * `cost` - Argon2id parameters
    pub fn hash(
        &self,
        pepper: Option<&[u8]>,
        cost: &HashCost,
    ) -> Result<HashedPassword, PasswordError> {
        let password_bytes = self.peppered(pepper);

        // 128-bit salt from the OS RNG
        let salt = SaltString::generate(&mut OsRng);

        let hash = cost
            .hasher()?
            .hash_password(&password_bytes, &salt)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// Comparing two `HashedPassword`s with `==` compares the stored strings; it
/// is never a way to check a clear text password. Use [`HashedPassword::verify`].
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordError> {
        let hash = s.into();

        PasswordHash::new(&hash).map_err(|_| PasswordError::InvalidHashFormat)?;

        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// Returns `Ok(false)` on a mismatch and `Err` only when verification
    /// could not be carried out at all.
    ///
    /// ## Arguments
    /// * `password` - The clear text password to verify
    /// * `pepper` - Optional pepper (must match the one used during hashing)
    pub fn verify(
        &self,
        password: &ClearTextPassword,
        pepper: Option<&[u8]>,
    ) -> Result<bool, PasswordError> {
        let password_bytes = password.peppered(pepper);

        let parsed_hash =
            PasswordHash::new(&self.hash).map_err(|_| PasswordError::InvalidHashFormat)?;

        // Parameters come from the PHC string; Argon2 compares in constant time.
        match Argon2::default().verify_password(&password_bytes, &parsed_hash) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::VerificationFailed(e.to_string())),
        }
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
