//! Login Use Case
//!
//! Checks a username/password pair against the stored hash.
//!
//! An unknown username and a wrong password produce the same
//! `InvalidCredentials` outcome. To keep the two cases close in timing as
//! well, an unknown username is still run through one Argon2 verification
//! against a dummy hash.

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::application::config::AuthConfig;
use crate::application::credentials;
use crate::domain::repository::AccountStore;
use crate::domain::value_object::{
    account_id::AccountId,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Password hashed once to produce the dummy hash
const DUMMY_PASSWORD: &str = "timing-equalization-dummy";

/// Login input
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Login output. Carries no credential material.
#[derive(Debug, Clone)]
pub struct LoginOutput {
    pub account_id: AccountId,
    pub user_name: UserName,
}

/// Login use case
pub struct LoginUseCase<S>
where
    S: AccountStore,
{
    store: Arc<S>,
    config: Arc<AuthConfig>,
    dummy_hash: Arc<OnceCell<UserPassword>>,
}

impl<S> LoginUseCase<S>
where
    S: AccountStore,
{
    pub fn new(
        store: Arc<S>,
        config: Arc<AuthConfig>,
        dummy_hash: Arc<OnceCell<UserPassword>>,
    ) -> Self {
        Self {
            store,
            config,
            dummy_hash,
        }
    }

    #[tracing::instrument(skip_all, fields(user_name = tracing::field::Empty))]
    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let (user_name, raw_password) = credentials::validate(input.username, input.password)?;
        tracing::Span::current().record("user_name", tracing::field::display(&user_name));

        let Some(account) = self.store.find_by_username(&user_name).await? else {
            self.burn_verification(raw_password).await;
            return Err(AuthError::InvalidCredentials);
        };

        let matches = credentials::verify_password(
            account.password_hash.clone(),
            raw_password,
            self.config.clone(),
        )
        .await?;

        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(
            account_id = %account.account_id,
            user_name = %account.user_name,
            "Account authenticated"
        );

        Ok(LoginOutput {
            account_id: account.account_id,
            user_name: account.user_name,
        })
    }

    /// Compute (or reuse) the dummy hash
    pub(crate) async fn dummy_hash(&self) -> AuthResult<&UserPassword> {
        self.dummy_hash
            .get_or_try_init(|| hash_dummy(self.config.clone()))
            .await
    }

    /// Spend one verification on the dummy hash. The outcome is ignored.
    async fn burn_verification(&self, raw_password: RawPassword) {
        let result = match self.dummy_hash().await {
            Ok(dummy) => {
                credentials::verify_password(dummy.clone(), raw_password, self.config.clone())
                    .await
            }
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, "Dummy verification failed");
        }
    }
}

async fn hash_dummy(config: Arc<AuthConfig>) -> AuthResult<UserPassword> {
    let raw = RawPassword::new(DUMMY_PASSWORD.to_string())?;
    credentials::hash_password(raw, config).await
}
