//! In-memory Credential Store
//!
//! Volatile store for tests and local experiments. The check-then-insert in
//! `create` happens under one lock, so it is atomic with respect to other
//! callers just like the SQLite UNIQUE constraint.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountStore;
use crate::domain::value_object::{
    account_id::AccountId, user_name::UserName, user_password::UserPassword,
};
use crate::error::{StoreError, StoreResult};

#[derive(Default)]
pub struct MemoryAccountStore {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    accounts: HashMap<UserName, Account>,
    last_id: i64,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.state.lock().await.accounts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl AccountStore for MemoryAccountStore {
    async fn create(
        &self,
        user_name: &UserName,
        password_hash: &UserPassword,
    ) -> StoreResult<Account> {
        let mut state = self.state.lock().await;

        if state.accounts.contains_key(user_name) {
            return Err(StoreError::DuplicateUsername);
        }

        state.last_id += 1;
        let account = Account {
            account_id: AccountId::from_i64(state.last_id),
            user_name: user_name.clone(),
            password_hash: password_hash.clone(),
            created_at: Utc::now(),
        };
        state.accounts.insert(user_name.clone(), account.clone());

        Ok(account)
    }

    async fn find_by_username(&self, user_name: &UserName) -> StoreResult<Option<Account>> {
        Ok(self.state.lock().await.accounts.get(user_name).cloned())
    }
}
