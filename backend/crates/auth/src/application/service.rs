//! Authentication Service
//!
//! The facade the HTTP layer holds. It owns no account state; the store is
//! injected at construction so tests can substitute an in-memory one.

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::application::config::AuthConfig;
use crate::application::login::{LoginInput, LoginOutput, LoginUseCase};
use crate::application::register::{RegisterInput, RegisterOutput, RegisterUseCase};
use crate::domain::repository::AccountStore;
use crate::domain::value_object::user_password::UserPassword;
use crate::error::AuthResult;

/// Register/login orchestration over an [`AccountStore`]
pub struct AuthService<S> {
    store: Arc<S>,
    config: Arc<AuthConfig>,
    dummy_hash: Arc<OnceCell<UserPassword>>,
}

impl<S> Clone for AuthService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
            dummy_hash: self.dummy_hash.clone(),
        }
    }
}

impl<S> AuthService<S>
where
    S: AccountStore,
{
    pub fn new(store: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            store,
            config,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Create an account
    pub async fn register(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        RegisterUseCase::new(self.store.clone(), self.config.clone())
            .execute(input)
            .await
    }

    /// Authenticate an account
    pub async fn login(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        self.login_use_case().execute(input).await
    }

    /// Precompute the dummy hash used for unknown usernames so the first
    /// such login is not slower than later ones.
    pub async fn warm_up(&self) -> AuthResult<()> {
        let login = self.login_use_case();
        login.dummy_hash().await?;
        Ok(())
    }

    fn login_use_case(&self) -> LoginUseCase<S> {
        LoginUseCase::new(
            self.store.clone(),
            self.config.clone(),
            self.dummy_hash.clone(),
        )
    }
}
