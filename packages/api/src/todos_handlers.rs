// ABOUTME: HTTP request handlers for todo operations
// ABOUTME: Each handler maps to a single storage call and returns a fixed confirmation body

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use tickbox_storage::{DbState, StorageError, TodoId, TodoInput};

use crate::error::{ApiResult, AppError};
use crate::extract::{ApiJson, ApiPath};
use crate::response::{
    MessageResponse, TodoListResponse, ToggleResponse, TODO_CREATED, TODO_DELETED, TODO_TOGGLED,
    TODO_UPDATED,
};

/// List all todos, newest first
pub async fn list_todos(State(db): State<DbState>) -> ApiResult<Json<TodoListResponse>> {
    info!("Listing todos");

    let todos = db.todo_storage.list_todos().await?;
    Ok(Json(TodoListResponse { todos }))
}

/// Create a new todo
pub async fn create_todo(
    State(db): State<DbState>,
    ApiJson(input): ApiJson<TodoInput>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let todo = db.todo_storage.create_todo(input).await?;
    info!("Created todo: {}", todo.id);

    Ok((StatusCode::CREATED, Json(MessageResponse::new(TODO_CREATED))))
}

/// Replace the title of an existing todo
pub async fn update_todo(
    State(db): State<DbState>,
    ApiPath(raw_id): ApiPath<i64>,
    ApiJson(input): ApiJson<TodoInput>,
) -> ApiResult<Json<MessageResponse>> {
    let todo_id = todo_id_from_path(raw_id)?;
    info!("Updating todo: {}", todo_id);

    db.todo_storage.update_todo(todo_id, input).await?;
    Ok(Json(MessageResponse::new(TODO_UPDATED)))
}

/// Flip the completed flag and report the new value
pub async fn toggle_todo(
    State(db): State<DbState>,
    ApiPath(raw_id): ApiPath<i64>,
) -> ApiResult<Json<ToggleResponse>> {
    let todo_id = todo_id_from_path(raw_id)?;
    info!("Toggling todo: {}", todo_id);

    let completed = db.todo_storage.toggle_todo(todo_id).await?;
    Ok(Json(ToggleResponse {
        message: TODO_TOGGLED,
        completed,
    }))
}

/// Delete a todo
pub async fn delete_todo(
    State(db): State<DbState>,
    ApiPath(raw_id): ApiPath<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let todo_id = todo_id_from_path(raw_id)?;
    info!("Deleting todo: {}", todo_id);

    db.todo_storage.delete_todo(todo_id).await?;
    Ok(Json(MessageResponse::new(TODO_DELETED)))
}

/// Any integer is a well-formed id; one outside the column range can never exist
fn todo_id_from_path(raw_id: i64) -> ApiResult<TodoId> {
    TodoId::try_from(raw_id).map_err(|_| AppError::from(StorageError::NotFound))
}
