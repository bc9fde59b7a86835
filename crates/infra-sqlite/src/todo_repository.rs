// SQLite TodoRepository Implementation

use crate::connection::{connect_with_retry, SqliteConfig};
use crate::error::map_sqlx_error;
use crate::schema::{ensure_schema, reset_schema};
use async_trait::async_trait;
use sqlx::SqlitePool;
use todo_core::domain::{Todo, TodoId};
use todo_core::error::{AppError, Result};
use todo_core::{Context, TodoRepository};

/// Todos stored in the `todos` table.
///
/// Each operation is a single statement (init excepted), so no explicit
/// locking or transactions are used; the database serializes writers.
pub struct SqliteTodoRepository {
    pool: SqlitePool,
}

impl SqliteTodoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect, retrying until the database answers or `ctx` is finished
    pub async fn connect(ctx: &Context, config: &SqliteConfig) -> Result<Self> {
        let pool = connect_with_retry(ctx, config).await?;
        Ok(Self::new(pool))
    }

    /// Create the table if absent without touching existing rows
    pub async fn ensure_schema(&self, ctx: &Context) -> Result<()> {
        ctx.run(ensure_schema(&self.pool)).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn list(&self, ctx: &Context) -> Result<Vec<Todo>> {
        let rows: Vec<TodoRow> = ctx
            .run(async {
                sqlx::query_as::<_, TodoRow>("SELECT id, task FROM todos ORDER BY id")
                    .fetch_all(&self.pool)
                    .await
                    .map_err(|e| map_sqlx_error("failed to select todos", e))
            })
            .await?;

        rows.into_iter().map(TodoRow::into_todo).collect()
    }

    async fn create(&self, ctx: &Context, task: &str) -> Result<()> {
        ctx.run(async {
            sqlx::query("INSERT INTO todos (task) VALUES (?)")
                .bind(task)
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("failed to insert todo", e))
        })
        .await?;

        Ok(())
    }

    async fn done(&self, ctx: &Context, id: TodoId) -> Result<()> {
        // SQLite rowids are signed; anything larger cannot exist
        let row_id = i64::try_from(id).map_err(|_| AppError::NotFound(id))?;

        let result = ctx
            .run(async {
                sqlx::query("DELETE FROM todos WHERE id = ?")
                    .bind(row_id)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| map_sqlx_error("failed to delete todo", e))
            })
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(id));
        }
        Ok(())
    }

    async fn init(&self, ctx: &Context) -> Result<()> {
        ctx.run(reset_schema(&self.pool)).await
    }
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct TodoRow {
    id: i64,
    task: Option<String>,
}

impl TodoRow {
    fn into_todo(self) -> Result<Todo> {
        let id = TodoId::try_from(self.id)
            .map_err(|_| AppError::Database(format!("invalid todo id in table: {}", self.id)))?;
        Ok(Todo::new(id, self.task.unwrap_or_default()))
    }
}
