// ABOUTME: Idempotent schema creation run once at startup
// ABOUTME: CREATE TABLE IF NOT EXISTS statements for the todos and legacy items tables

use sqlx::{PgPool, SqlitePool};
use tracing::debug;

use crate::{StorageError, StorageResult};

/// `completed` stays nullable here so databases created by earlier
/// deployments keep the exact same definition.
pub const POSTGRES_SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS items (
        id SERIAL PRIMARY KEY,
        title VARCHAR(200) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS todos (
        id SERIAL PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        completed BOOLEAN DEFAULT FALSE
    )
    "#,
];

/// AUTOINCREMENT keeps ids from being reused after deletes.
pub const SQLITE_SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title VARCHAR(200) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS todos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title VARCHAR(255) NOT NULL,
        completed BOOLEAN NOT NULL DEFAULT FALSE
    )
    "#,
];

pub async fn ensure_postgres_schema(pool: &PgPool) -> StorageResult<()> {
    let mut tx = pool.begin().await.map_err(StorageError::Sqlx)?;

    for statement in POSTGRES_SCHEMA {
        sqlx::query(*statement)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;
    }

    tx.commit().await.map_err(StorageError::Sqlx)?;

    debug!("PostgreSQL schema ensured");
    Ok(())
}

pub async fn ensure_sqlite_schema(pool: &SqlitePool) -> StorageResult<()> {
    let mut tx = pool.begin().await.map_err(StorageError::Sqlx)?;

    for statement in SQLITE_SCHEMA {
        sqlx::query(*statement)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;
    }

    tx.commit().await.map_err(StorageError::Sqlx)?;

    debug!("SQLite schema ensured");
    Ok(())
}
