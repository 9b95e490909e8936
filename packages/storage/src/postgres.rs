// ABOUTME: PostgreSQL implementation of TodoStorage
// ABOUTME: One statement per operation, NotFound derived from RETURNING yielding no row

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::schema::ensure_postgres_schema;
use crate::types::{validate_title, Todo, TodoId, TodoInput};
use crate::{StorageError, StorageResult, TodoStorage};

/// PostgreSQL implementation of TodoStorage
pub struct PgTodoStorage {
    pool: PgPool,
}

impl PgTodoStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoStorage for PgTodoStorage {
    async fn initialize(&self) -> StorageResult<()> {
        ensure_postgres_schema(&self.pool).await
    }

    async fn list_todos(&self) -> StorageResult<Vec<Todo>> {
        // Rows written before `completed` had a value read as not completed
        sqlx::query_as::<_, Todo>(
            "SELECT id, title, COALESCE(completed, FALSE) AS completed FROM todos ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)
    }

    async fn create_todo(&self, input: TodoInput) -> StorageResult<Todo> {
        let title = validate_title(&input.title)?;

        let todo = sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (title, completed)
            VALUES ($1, FALSE)
            RETURNING id, title, COALESCE(completed, FALSE) AS completed
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
            sqlx::query_scalar("UPDATE todos SET title = $1 WHERE id = $2 RETURNING id")
                .bind(title)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(StorageError::Sqlx)?;

        updated.map(|_| ()).ok_or(StorageError::NotFound)
    }

    async fn toggle_todo(&self, id: TodoId) -> StorageResult<bool> {
        let completed: Option<bool> = sqlx::query_scalar(
            r#"
            UPDATE todos
            SET completed = NOT COALESCE(completed, FALSE)
            WHERE id = $1
            RETURNING completed
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        completed.ok_or(StorageError::NotFound)
    }

    async fn delete_todo(&self, id: TodoId) -> StorageResult<()> {
        let deleted: Option<TodoId> = sqlx::query_scalar("DELETE FROM todos WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        deleted.map(|_| ()).ok_or(StorageError::NotFound)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
