// ABOUTME: Data layer for Tickbox todos
// ABOUTME: Storage trait, PostgreSQL and SQLite backends, schema initialization and shared DbState

use async_trait::async_trait;
use thiserror::Error;

pub mod db;
pub mod postgres;
pub mod schema;
pub mod sqlite;
pub mod types;

// Re-export main types
pub use db::DbState;
pub use postgres::PgTodoStorage;
pub use sqlite::SqliteTodoStorage;
pub use types::{validate_title, Todo, TodoId, TodoInput, MAX_TITLE_LENGTH};

// Re-export sqlx so callers can name driver errors and pools
pub use sqlx;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Todo not found")]
    NotFound,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Operations every todo backend provides.
///
/// Each mutating method issues exactly one statement; a missing row is
/// reported as [`StorageError::NotFound`] based on that statement returning
/// nothing, never on a separate lookup.
#[async_trait]
pub trait TodoStorage: Send + Sync {
    /// Create the `todos` and legacy `items` tables if they are absent
    async fn initialize(&self) -> StorageResult<()>;

    /// All todos, newest (highest id) first
    async fn list_todos(&self) -> StorageResult<Vec<Todo>>;

    async fn create_todo(&self, input: TodoInput) -> StorageResult<Todo>;

    async fn update_todo(&self, id: TodoId, input: TodoInput) -> StorageResult<()>;

    /// Flip `completed` and return the stored value
    async fn toggle_todo(&self, id: TodoId) -> StorageResult<bool>;

    async fn delete_todo(&self, id: TodoId) -> StorageResult<()>;

    /// Short backend name used in logs
    fn backend(&self) -> &'static str;
}
