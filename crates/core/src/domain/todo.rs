// Todo Domain Model

use serde::{Deserialize, Serialize};

/// Todo ID, assigned by the backend (starts at 1 after init)
pub type TodoId = u64;

/// A live todo. Backends hand out owned copies only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub task: String,
}

impl Todo {
    pub fn new(id: TodoId, task: impl Into<String>) -> Self {
        Self {
            id,
            task: task.into(),
        }
    }
}
