// Todo Infrastructure - SQLite Adapter
// Implements: TodoRepository

mod connection;
mod error;
mod schema;
mod todo_repository;

pub use connection::{connect_with_retry, create_pool, SqliteConfig, CONNECT_RETRY_INTERVAL};
pub use schema::{ensure_schema, reset_schema};
pub use todo_repository::SqliteTodoRepository;

// Note: sqlx::Error conversion is handled by the helper in error.rs
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
