// In-Memory TodoRepository Implementation

use async_trait::async_trait;
use todo_core::domain::{Todo, TodoId};
use todo_core::error::{AppError, Result};
use todo_core::{Context, TodoRepository};
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

#[derive(Debug, Default)]
struct State {
    todos: Vec<Todo>,
    last_id: TodoId,
}

/// Todos kept in creation order behind a single lock.
///
/// Each instance owns its own state, so independent stores can coexist.
/// Every operation holds the lock for its whole duration.
#[derive(Debug, Default)]
pub struct InMemoryTodoRepository {
    state: Mutex<State>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // Lock acquisition races the context so a waiting caller can give up
    async fn lock(&self, ctx: &Context) -> Result<MutexGuard<'_, State>> {
        ctx.run(async { Ok(self.state.lock().await) }).await
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn list(&self, ctx: &Context) -> Result<Vec<Todo>> {
        let state = self.lock(ctx).await?;
        Ok(state.todos.clone())
    }

    async fn create(&self, ctx: &Context, task: &str) -> Result<()> {
        let mut state = self.lock(ctx).await?;
        state.last_id += 1;
        let id = state.last_id;
        state.todos.push(Todo::new(id, task));
        debug!(todo_id = id, "Todo created");
        Ok(())
    }

    async fn done(&self, ctx: &Context, id: TodoId) -> Result<()> {
        let mut state = self.lock(ctx).await?;
        let idx = state
            .todos
            .iter()
            .position(|todo| todo.id == id)
            .ok_or(AppError::NotFound(id))?;
        state.todos.remove(idx);
        debug!(todo_id = id, "Todo done");
        Ok(())
    }

    async fn init(&self, ctx: &Context) -> Result<()> {
        let mut state = self.lock(ctx).await?;
        state.todos.clear();
        state.last_id = 0;
        debug!("In-memory store reset");
        Ok(())
    }
}
