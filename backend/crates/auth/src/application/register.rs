//! Register Use Case
//!
//! Creates a new account with a freshly salted password hash.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::credentials;
use crate::domain::repository::AccountStore;
use crate::domain::value_object::{account_id::AccountId, user_name::UserName};
use crate::error::AuthResult;

/// Register input
pub struct RegisterInput {
    pub username: String,
    pub password: String,
}

/// Register output. Carries no credential material.
#[derive(Debug, Clone)]
pub struct RegisterOutput {
    pub account_id: AccountId,
    pub user_name: UserName,
}

/// Register use case
pub struct RegisterUseCase<S>
where
    S: AccountStore,
{
    store: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> RegisterUseCase<S>
where
    S: AccountStore,
{
    pub fn new(store: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self { store, config }
    }

    #[tracing::instrument(skip_all, fields(user_name = tracing::field::Empty))]
    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let (user_name, raw_password) = credentials::validate(input.username, input.password)?;
        tracing::Span::current().record("user_name", tracing::field::display(&user_name));

        let password_hash = credentials::hash_password(raw_password, self.config.clone()).await?;

        // Uniqueness is decided by the store's insert; DuplicateUsername maps to UsernameTaken.
        let account = self.store.create(&user_name, &password_hash).await?;

        tracing::info!(
            account_id = %account.account_id,
            user_name = %account.user_name,
            "Account registered"
        );

        Ok(RegisterOutput {
            account_id: account.account_id,
            user_name: account.user_name,
        })
    }
}
