// ABOUTME: Database connection management and storage initialization
// ABOUTME: Provides the shared data-access handle passed to every API handler

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{PgPool, SqlitePool};
use tracing::{debug, info};

use tickbox_config::{DatabaseConfig, DatabaseTarget};

use crate::postgres::PgTodoStorage;
use crate::sqlite::SqliteTodoStorage;
use crate::{StorageError, StorageResult, TodoStorage};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
enum DatabasePool {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

/// Shared database state for API handlers
#[derive(Clone)]
pub struct DbState {
    pub todo_storage: Arc<dyn TodoStorage>,
    pool: DatabasePool,
}

impl DbState {
    /// Wrap an existing PostgreSQL pool. Does not touch the schema.
    pub fn from_postgres_pool(pool: PgPool) -> Self {
        Self {
            todo_storage: Arc::new(PgTodoStorage::new(pool.clone())),
            pool: DatabasePool::Postgres(pool),
        }
    }

    /// Wrap an existing SQLite pool. Does not touch the schema.
    pub fn from_sqlite_pool(pool: SqlitePool) -> Self {
        Self {
            todo_storage: Arc::new(SqliteTodoStorage::new(pool.clone())),
            pool: DatabasePool::Sqlite(pool),
        }
    }

    /// Connect to the configured database and ensure the schema exists.
    ///
    /// This is the only way the server obtains a handle, so a failure here
    /// means the server never starts listening.
    pub async fn connect(config: &DatabaseConfig) -> StorageResult<Self> {
        info!("Connecting to database: {}", config.target.redacted());

        let state = match &config.target {
            DatabaseTarget::Url(url) if is_sqlite_url(url) => {
                let options = SqliteConnectOptions::from_str(url).map_err(StorageError::Sqlx)?;
                Self::connect_sqlite(options, is_memory_url(url), config.max_connections).await?
            }
            DatabaseTarget::Url(url) => {
                let options = PgConnectOptions::from_str(url).map_err(StorageError::Sqlx)?;
                Self::connect_postgres(options, config.max_connections).await?
            }
            DatabaseTarget::Postgres {
                host,
                port,
                username,
                password,
                database,
            } => {
                let options = PgConnectOptions::new()
                    .host(host)
                    .port(*port)
                    .username(username)
                    .password(password)
                    .database(database);
                Self::connect_postgres(options, config.max_connections).await?
            }
        };

        state.todo_storage.initialize().await?;

        info!(
            "Database connection established ({})",
            state.todo_storage.backend()
        );

        Ok(state)
    }

    /// Private in-memory SQLite database with the schema already created
    pub async fn in_memory() -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").map_err(StorageError::Sqlx)?;
        let state = Self::connect_sqlite(options, true, 1).await?;
        state.todo_storage.initialize().await?;
        Ok(state)
    }

    async fn connect_postgres(options: PgConnectOptions, max_connections: u32) -> StorageResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .test_before_acquire(true)
            .connect_with(options)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(Self::from_postgres_pool(pool))
    }

    async fn connect_sqlite(
        options: SqliteConnectOptions,
        in_memory: bool,
        max_connections: u32,
    ) -> StorageResult<Self> {
        let pool = if in_memory {
            // Every connection to :memory: is a separate database, so the
            // pool must hold on to exactly one for its whole lifetime.
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(Option::<Duration>::None)
                .max_lifetime(Option::<Duration>::None)
                .acquire_timeout(ACQUIRE_TIMEOUT)
                .connect_with(options)
                .await
                .map_err(StorageError::Sqlx)?
        } else {
            SqlitePoolOptions::new()
                .max_connections(max_connections)
                .acquire_timeout(ACQUIRE_TIMEOUT)
                .connect_with(
                    options
                        .create_if_missing(true)
                        .journal_mode(SqliteJournalMode::Wal),
                )
                .await
                .map_err(StorageError::Sqlx)?
        };

        Ok(Self::from_sqlite_pool(pool))
    }

    /// Close the pool, waiting for checked-out connections to be returned
    pub async fn close(&self) {
        match &self.pool {
            DatabasePool::Postgres(pool) => pool.close().await,
            DatabasePool::Sqlite(pool) => pool.close().await,
        }
        debug!("Database pool closed");
    }

    pub fn is_closed(&self) -> bool {
        match &self.pool {
            DatabasePool::Postgres(pool) => pool.is_closed(),
            DatabasePool::Sqlite(pool) => pool.is_closed(),
        }
    }
}

fn is_sqlite_url(url: &str) -> bool {
    url.starts_with("sqlite:")
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}
