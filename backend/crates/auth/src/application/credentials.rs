//! Shared credential steps for the register and login use cases.
//!
//! Argon2 is CPU-bound, so hashing and verification run on tokio's blocking
//! pool instead of a request worker.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::value_object::{
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Reject missing input before anything touches storage or the hasher
pub(crate) fn validate(username: String, password: String) -> AuthResult<(UserName, RawPassword)> {
    let user_name = UserName::new(username);
    let raw_password = RawPassword::new(password);
    Ok((user_name?, raw_password?))
}

pub(crate) async fn hash_password(
    raw: RawPassword,
    config: Arc<AuthConfig>,
) -> AuthResult<UserPassword> {
    let hashed = tokio::task::spawn_blocking(move || {
        UserPassword::from_raw(&raw, config.pepper(), &config.hash_cost)
    })
    .await
    .map_err(|e| AuthError::Internal(format!("Hashing task failed: {e}")))??;

    Ok(hashed)
}

pub(crate) async fn verify_password(
    hash: UserPassword,
    raw: RawPassword,
    config: Arc<AuthConfig>,
) -> AuthResult<bool> {
    let matches = tokio::task::spawn_blocking(move || hash.verify(&raw, config.pepper()))
        .await
        .map_err(|e| AuthError::Internal(format!("Verification task failed: {e}")))??;

    Ok(matches)
}
