// SQLite Connection Pool Setup

use crate::error::map_sqlx_error;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::Connection;
use std::str::FromStr;
use std::time::Duration;
use todo_core::{Context, Result};
use tracing::{error, info};

/// Fixed delay between connection attempts
pub const CONNECT_RETRY_INTERVAL: Duration = Duration::from_secs(1);

const DEFAULT_DATABASE_URL: &str = "sqlite://todo.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings for the SQLite backend
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub busy_timeout: Duration,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}

impl SqliteConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }

    // An in-memory database lives only as long as its connection
    fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

/// Create SQLite connection pool with WAL mode and verify it answers a ping
pub async fn create_pool(config: &SqliteConfig) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .map_err(|e| map_sqlx_error("invalid database url", e))?
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(config.busy_timeout)
        .create_if_missing(true);

    let pool_options = if config.is_in_memory() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(config.max_connections)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(|e| map_sqlx_error("failed to open database", e))?;

    let mut conn = pool
        .acquire()
        .await
        .map_err(|e| map_sqlx_error("failed to acquire connection", e))?;
    conn.ping()
        .await
        .map_err(|e| map_sqlx_error("failed to ping database", e))?;

    Ok(pool)
}

/// Open the pool, retrying every [`CONNECT_RETRY_INTERVAL`] until it succeeds
/// or `ctx` is finished. Returns the context's error in the latter case.
pub async fn connect_with_retry(ctx: &Context, config: &SqliteConfig) -> Result<SqlitePool> {
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        match ctx.run(create_pool(config)).await {
            Ok(pool) => {
                info!(attempt, "Connected to database");
                return Ok(pool);
            }
            Err(err) if err.is_cancellation() => return Err(err),
            Err(err) => {
                error!(error = %err, attempt, "Failed to connect to database");
            }
        }

        tokio::select! {
            err = ctx.done() => return Err(err),
            _ = tokio::time::sleep(CONNECT_RETRY_INTERVAL) => {}
        }
    }
}
