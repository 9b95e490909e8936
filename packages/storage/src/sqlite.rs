// ABOUTME: SQLite implementation of TodoStorage
// ABOUTME: Used for local development and tests; same statements as PostgreSQL with ? placeholders

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::schema::ensure_sqlite_schema;
use crate::types::{validate_title, Todo, TodoId, TodoInput};
use crate::{StorageError, StorageResult, TodoStorage};

/// SQLite implementation of TodoStorage
pub struct SqliteTodoStorage {
    pool: SqlitePool,
}

impl SqliteTodoStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoStorage for SqliteTodoStorage {
    async fn initialize(&self) -> StorageResult<()> {
        ensure_sqlite_schema(&self.pool).await
    }

    async fn list_todos(&self) -> StorageResult<Vec<Todo>> {
        sqlx::query_as::<_, Todo>("SELECT id, title, completed FROM todos ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)
    }

    async fn create_todo(&self, input: TodoInput) -> StorageResult<Todo> {
        let title = validate_title(&input.title)?;

        let todo = sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (title, completed)
            VALUES (?, FALSE)
            RETURNING id, title, completed
            "#,
        )
        .bind(title)
        .fetch_one(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        debug!("Inserted todo {}", todo.id);
        Ok(todo)
    }

    async fn update_todo(&self, id: TodoId, input: TodoInput) -> StorageResult<()> {
        let title = validate_title(&input.title)?;

        let updated: Option<TodoId> =
            sqlx::query_scalar("UPDATE todos SET title = ? WHERE id = ? RETURNING id")
                .bind(title)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(StorageError::Sqlx)?;

        updated.map(|_| ()).ok_or(StorageError::NotFound)
    }

    async fn toggle_todo(&self, id: TodoId) -> StorageResult<bool> {
        let completed: Option<bool> = sqlx::query_scalar(
            "UPDATE todos SET completed = NOT completed WHERE id = ? RETURNING completed",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        completed.ok_or(StorageError::NotFound)
    }

    async fn delete_todo(&self, id: TodoId) -> StorageResult<()> {
        let deleted: Option<TodoId> = sqlx::query_scalar("DELETE FROM todos WHERE id = ? RETURNING id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        deleted.map(|_| ()).ok_or(StorageError::NotFound)
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}
