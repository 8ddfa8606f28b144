//! Application Configuration
//!
//! Configuration for the Auth application layer.

pub use platform::password::HashCost;

/// Auth application configuration
#[derive(Clone, Default)]
pub struct AuthConfig {
    /// Argon2id cost for newly created hashes
    pub hash_cost: HashCost,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl AuthConfig {
    /// Cheap hashing for tests
    pub fn testing() -> Self {
        Self {
            hash_cost: HashCost::testing(),
            ..Default::default()
        }
    }

    /// Set the password pepper
    pub fn with_pepper(mut self, pepper: impl Into<Vec<u8>>) -> Self {
        self.password_pepper = Some(pepper.into());
        self
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("hash_cost", &self.hash_cost)
            .field(
                "password_pepper",
                &self.password_pepper.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}
