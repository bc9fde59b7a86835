//! HTTP Server
//!
//! Router assembly plus a serve loop that drains in-flight requests
//! once the shutdown context finishes.

use crate::handler::{create_todo, done_todo, health_check, init_todos, list_todos, not_found};
use crate::middleware::access_log;
use axum::routing::{delete, get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use todo_core::{Context, TodoRepository};
use tokio::net::TcpListener;
use tracing::info;

const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
const DEFAULT_HTTP_PORT: u16 = 8080;
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared handler state
#[derive(Clone)]
pub struct ApiState {
    pub(crate) repo: Arc<dyn TodoRepository>,
    request_timeout: Duration,
}

impl ApiState {
    pub fn new(repo: Arc<dyn TodoRepository>, request_timeout: Duration) -> Self {
        Self {
            repo,
            request_timeout,
        }
    }

    // Independent of server shutdown: in-flight requests get to finish
    pub(crate) fn request_context(&self) -> Context {
        Context::with_timeout(self.request_timeout)
    }
}

/// Build the todo router
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/todo", get(list_todos).post(create_todo))
        .route("/todo/{id}", delete(done_todo))
        .route("/initialize", post(init_todos))
        .route("/healthz", get(health_check))
        .fallback(not_found)
        .layer(axum::middleware::from_fn(access_log))
        .with_state(state)
}

/// HTTP Server Configuration
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout: Duration,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HTTP_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// HTTP Server
pub struct HttpServer {
    config: HttpServerConfig,
    repo: Arc<dyn TodoRepository>,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig, repo: Arc<dyn TodoRepository>) -> Self {
        Self { config, repo }
    }

    /// Bind and serve until `shutdown` finishes, then wait for in-flight requests
    pub async fn serve(self, shutdown: Context) -> std::io::Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr).await?;
        self.serve_on(listener, shutdown).await
    }

    /// Serve on an already bound listener
    pub async fn serve_on(self, listener: TcpListener, shutdown: Context) -> std::io::Result<()> {
        let app = router(ApiState::new(self.repo, self.config.request_timeout));

        info!(address = %listener.local_addr()?, "Starting the server");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.done().await;
                info!("Shutting down server");
            })
            .await?;

        info!("Server has been shut down");
        Ok(())
    }
}
