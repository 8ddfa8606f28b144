//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infrastructure layer.

use crate::domain::entity::account::Account;
use crate::domain::value_object::{user_name::UserName, user_password::UserPassword};
use crate::error::StoreResult;

/// Account credential store
///
/// Implementations must make `create` a single atomic operation: the
/// uniqueness check belongs to the storage layer, never to a prior read.
#[trait_variant::make(AccountStore: Send)]
pub trait LocalAccountStore {
    /// Insert a new account
    ///
    /// Fails with `StoreError::DuplicateUsername` if the user name exists.
    async fn create(&self, user_name: &UserName, password_hash: &UserPassword)
    -> StoreResult<Account>;

    /// Exact-match lookup. `Ok(None)` means no such account.
    async fn find_by_username(&self, user_name: &UserName) -> StoreResult<Option<Account>>;
}
