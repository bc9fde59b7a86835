//! HTTP Request/Response Types

use serde::{Deserialize, Serialize};
use todo_core::Todo;

/// POST /todo body. A missing or null task is stored as an empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub task: Option<String>,
}

impl CreateTodoRequest {
    pub fn into_task(self) -> String {
        self.task.unwrap_or_default()
    }
}

/// GET /todo body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTodosResponse {
    pub todos: Vec<Todo>,
}
