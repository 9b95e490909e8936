// ABOUTME: Response bodies for the todo API
// ABOUTME: Fixed confirmation messages plus the list and toggle payloads

use serde::Serialize;

use tickbox_storage::Todo;

pub const TODO_CREATED: &str = "Todo created.";
pub const TODO_UPDATED: &str = "Todo updated.";
pub const TODO_TOGGLED: &str = "Todo toggled.";
pub const TODO_DELETED: &str = "Todo deleted.";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TodoListResponse {
    pub todos: Vec<Todo>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub message: &'static str,
    pub completed: bool,
}
