//! Todo Service - Main Entry Point

mod config;

use anyhow::{anyhow, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, LogFormat};
use todo_api_http::HttpServer;
use todo_core::{AppError, Context, TodoRepository};
use todo_infra_memory::InMemoryTodoRepository;
use todo_infra_sqlite::{SqliteConfig, SqliteTodoRepository};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_LOG_FILTER: &str =
    "todo_server=info,todo_api_http=info,todo_infra_sqlite=info,todo_infra_memory=info";

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    // 1. Initialize logging
    init_logging(config.log_format);
    info!("Todo service v{} starting...", VERSION);

    // 2. Shutdown context, cancelled by Ctrl+C / SIGTERM
    let (shutdown, cancel) = Context::with_cancel();
    tokio::spawn(async move {
        shutdown_signal().await;
        cancel.cancel();
    });

    // 3. Select backend
    let repo: Arc<dyn TodoRepository> = if config.in_memory {
        info!("Using in-memory repository");
        Arc::new(InMemoryTodoRepository::new())
    } else {
        let sqlite_config = config.sqlite_config();
        info!(database_url = %sqlite_config.database_url, "Connecting to database...");

        let ctx = match config.connect_timeout() {
            Some(timeout) => shutdown.child_with_timeout(timeout),
            None => shutdown.clone(),
        };
        match open_sqlite(&ctx, &sqlite_config).await {
            Ok(Some(repo)) => Arc::new(repo),
            Ok(None) => {
                info!("Server stopped");
                return Ok(());
            }
            Err(e) => {
                error!(error = %e, "Server failed");
                return Err(e);
            }
        }
    };

    // 4. Serve until shutdown, draining in-flight requests
    HttpServer::new(config.http_config(), repo)
        .serve(shutdown)
        .await
        .map_err(|e| {
            error!(error = %e, "Server stopped");
            anyhow!("HTTP server failed: {}", e)
        })?;

    info!("Shutdown complete.");
    Ok(())
}

/// Connect and create the table. `None` means shutdown arrived before the
/// database was ready, which is a clean stop rather than a failure.
async fn open_sqlite(ctx: &Context, config: &SqliteConfig) -> Result<Option<SqliteTodoRepository>> {
    let repo = match SqliteTodoRepository::connect(ctx, config).await {
        Ok(repo) => repo,
        Err(AppError::Cancelled) => return Ok(None),
        Err(e) => return Err(anyhow!("Database connection failed: {}", e)),
    };
    match repo.ensure_schema(ctx).await {
        Ok(()) => Ok(Some(repo)),
        Err(AppError::Cancelled) => Ok(None),
        Err(e) => Err(anyhow!("Schema setup failed: {}", e)),
    }
}

fn init_logging(format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    match format {
        LogFormat::Json => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        LogFormat::Pretty => {
            // Development: Pretty formatting with colors
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received terminate signal, shutting down"),
    }
}
