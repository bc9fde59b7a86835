//! Command-line / environment configuration

use clap::{Parser, ValueEnum};
use std::time::Duration;
use todo_api_http::HttpServerConfig;
use todo_infra_sqlite::SqliteConfig;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable, colored
    Pretty,
    /// One JSON object per line
    Json,
}

/// Todo service configuration. Every flag falls back to an env variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "todo-server", version, about = "Minimal todo HTTP service")]
pub struct Config {
    /// Port to listen on
    #[arg(long, env = "TODO_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "TODO_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Use the in-memory repository instead of SQLite
    #[arg(long, env = "TODO_IN_MEMORY")]
    pub in_memory: bool,

    /// SQLite database URL
    #[arg(long, env = "TODO_DATABASE_URL", default_value = "sqlite://todo.db")]
    pub database_url: String,

    /// Connection pool size
    #[arg(
        long,
        env = "TODO_DB_MAX_CONNECTIONS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_connections: u32,

    /// Give up connecting to the database after this many seconds (default: retry until shutdown)
    #[arg(long, env = "TODO_CONNECT_TIMEOUT_SECS")]
    pub connect_timeout_secs: Option<u64>,

    /// Per-request deadline in seconds
    #[arg(
        long,
        env = "TODO_REQUEST_TIMEOUT_SECS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub request_timeout_secs: u64,

    /// Log output format
    #[arg(long, env = "TODO_LOG_FORMAT", value_enum, default_value = "pretty")]
    pub log_format: LogFormat,
}

impl Config {
    pub fn sqlite_config(&self) -> SqliteConfig {
        SqliteConfig {
            database_url: self.database_url.clone(),
            max_connections: self.max_connections,
            ..SqliteConfig::default()
        }
    }

    pub fn http_config(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: self.port,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }
}
