//! SQLite Credential Store
//!
//! Durable account storage in a single `accounts` table. Username
//! uniqueness is the table's UNIQUE constraint, so concurrent registrations
//! of the same name race inside SQLite and exactly one insert wins.

use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountStore;
use crate::domain::value_object::{
    account_id::AccountId, user_name::UserName, user_password::UserPassword,
};
use crate::error::{StoreError, StoreResult};

/// `AUTOINCREMENT` keeps ids from being reused even after the highest row is gone.
const CREATE_ACCOUNTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS accounts (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    username      TEXT    NOT NULL UNIQUE,
    password_hash TEXT    NOT NULL,
    created_at    TEXT    NOT NULL
)
"#;

// ============================================================================
// Configuration
// ============================================================================

/// Connection settings for [`SqliteAccountStore`]
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// e.g. `sqlite://accounts.db` or `sqlite::memory:`
    pub database_url: String,
    /// Pool size
    pub max_connections: u32,
    /// How long to wait for a free connection
    pub acquire_timeout: Duration,
    /// Upper bound for a single store operation
    pub operation_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://accounts.db".to_string(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
            operation_timeout: Duration::from_secs(5),
        }
    }
}

impl StoreConfig {
    /// Private in-memory database. One connection, since every SQLite
    /// memory connection is its own database.
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            ..Default::default()
        }
    }

    fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

// ============================================================================
// Store
// ============================================================================

/// SQLite-backed account store
#[derive(Clone)]
pub struct SqliteAccountStore {
    pool: SqlitePool,
    operation_timeout: Duration,
}

impl SqliteAccountStore {
    pub fn new(pool: SqlitePool, operation_timeout: Duration) -> Self {
        Self {
            pool,
            operation_timeout,
        }
    }

    /// Open the database (creating the file if needed) and build the pool
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(config.operation_timeout);

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout);

        if config.is_in_memory() {
            // Closing the last connection would drop the database.
            pool_options = pool_options
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>);
        }

        let pool = pool_options.connect_with(options).await?;

        tracing::info!(
            database_url = %config.database_url,
            max_connections = config.max_connections,
            "Connected to account database"
        );

        Ok(Self::new(pool, config.operation_timeout))
    }

    /// Create the accounts table if it does not exist. Safe to call repeatedly.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        self.bounded(sqlx::query(CREATE_ACCOUNTS_TABLE).execute(&self.pool))
            .await?;

        tracing::debug!("Account schema ready");
        Ok(())
    }

    /// Close all pooled connections
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Run a query with the operation timeout applied
    async fn bounded<T, F>(&self, query: F) -> StoreResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.operation_timeout, query).await {
            Ok(result) => result.map_err(StoreError::from),
            Err(_) => Err(StoreError::Timeout(self.operation_timeout)),
        }
    }
}

impl AccountStore for SqliteAccountStore {
    async fn create(
        &self,
        user_name: &UserName,
        password_hash: &UserPassword,
    ) -> StoreResult<Account> {
        let row = self
            .bounded(
                sqlx::query_as::<_, AccountRow>(
                    r#"
                    INSERT INTO accounts (username, password_hash, created_at)
                    VALUES (?, ?, ?)
                    RETURNING id, username, password_hash, created_at
                    "#,
                )
                .bind(user_name.as_str())
                .bind(password_hash.as_phc_string())
                .bind(Utc::now())
                .fetch_one(&self.pool),
            )
            .await?;

        row.into_account()
    }

    async fn find_by_username(&self, user_name: &UserName) -> StoreResult<Option<Account>> {
        let row = self
            .bounded(
                sqlx::query_as::<_, AccountRow>(
                    r#"
                    SELECT id, username, password_hash, created_at
                    FROM accounts
                    WHERE username = ?
                    "#,
                )
                .bind(user_name.as_str())
                .fetch_optional(&self.pool),
            )
            .await?;

        row.map(AccountRow::into_account).transpose()
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i64,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> StoreResult<Account> {
        let user_name = UserName::new(self.username)
            .map_err(|e| StoreError::CorruptRecord(format!("account {}: {}", self.id, e)))?;

        let password_hash = UserPassword::from_phc_string(self.password_hash)
            .map_err(|e| StoreError::CorruptRecord(format!("account {}: {}", self.id, e)))?;

        Ok(Account {
            account_id: AccountId::from_i64(self.id),
            user_name,
            password_hash,
            created_at: self.created_at,
        })
    }
}
