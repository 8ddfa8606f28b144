//! Account Entity
//!
//! A registered identity and its credential hash. Created once by the store
//! and never modified afterwards.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    account_id::AccountId, user_name::UserName, user_password::UserPassword,
};

/// Account entity
///
/// Only the store constructs these. The password hash must not leave the
/// application layer; responses are built from `account_id` and `user_name`.
#[derive(Debug, Clone)]
pub struct Account {
    /// Store-assigned identifier, never reused
    pub account_id: AccountId,
    /// Unique, case-sensitive login handle
    pub user_name: UserName,
    /// Argon2id hash
    pub password_hash: UserPassword,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
