// Todo Repository Port (Interface)

use crate::context::Context;
use crate::domain::{Todo, TodoId};
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface every todo backend honors with identical semantics
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// List all live todos in a deterministic order (empty Vec when none)
    async fn list(&self, ctx: &Context) -> Result<Vec<Todo>>;

    /// Append a todo under the next id
    async fn create(&self, ctx: &Context, task: &str) -> Result<()>;

    /// Remove a todo. Fails with `AppError::NotFound` if no live todo has `id`.
    async fn done(&self, ctx: &Context, id: TodoId) -> Result<()>;

    /// Reset to the empty state; the next create gets id 1.
    /// Bootstrap/test only.
    async fn init(&self, ctx: &Context) -> Result<()>;
}
