// Schema Setup
//
// One table, no migrations: the todo table layout never evolves.

use crate::error::map_sqlx_error;
use sqlx::SqlitePool;
use todo_core::Result;
use tracing::info;

const CREATE_TODOS_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS todos (id INTEGER PRIMARY KEY AUTOINCREMENT, task TEXT)";

/// Create the todos table if it is absent. Existing rows are kept.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(CREATE_TODOS_TABLE)
        .execute(pool)
        .await
        .map_err(|e| map_sqlx_error("failed to create table", e))?;
    Ok(())
}

/// Create the table if needed, then truncate it and restart AUTOINCREMENT at 1
pub async fn reset_schema(pool: &SqlitePool) -> Result<()> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| map_sqlx_error("failed to begin transaction", e))?;

    sqlx::query(CREATE_TODOS_TABLE)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("failed to create table", e))?;

    // SQLite has no TRUNCATE; clearing sqlite_sequence resets the id counter
    sqlx::query("DELETE FROM todos")
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("failed to truncate table", e))?;
    sqlx::query("DELETE FROM sqlite_sequence WHERE name = 'todos'")
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("failed to reset id sequence", e))?;

    tx.commit()
        .await
        .map_err(|e| map_sqlx_error("failed to commit reset", e))?;

    info!("Todo table reset");
    Ok(())
}
