// ABOUTME: Todo type definitions and input validation
// ABOUTME: Typed record returned by every storage backend plus the title rules

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{StorageError, StorageResult};

/// Identifier assigned by the database (`SERIAL` / `AUTOINCREMENT`)
pub type TodoId = i32;

/// Matches the `VARCHAR(255)` title column
pub const MAX_TITLE_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
}

/// Body accepted by create and update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoInput {
    pub title: String,
}

impl TodoInput {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Returns the trimmed title, or `InvalidInput` when it is blank or too long.
pub fn validate_title(title: &str) -> StorageResult<String> {
    let trimmed = title.trim();

    if trimmed.is_empty() {
        return Err(StorageError::InvalidInput("Title is required.".to_string()));
    }

    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(StorageError::InvalidInput(format!(
            "Title must be at most {} characters.",
            MAX_TITLE_LENGTH
        )));
    }

    Ok(trimmed.to_string())
}
