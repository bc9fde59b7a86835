//! HTTP Handlers
//!
//! One repository call per request, under a per-request context.

use crate::error::ApiError;
use crate::server::ApiState;
use crate::types::{CreateTodoRequest, ListTodosResponse};
use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

/// GET /todo
pub async fn list_todos(State(state): State<ApiState>) -> Result<Json<ListTodosResponse>, ApiError> {
    let ctx = state.request_context();
    let todos = state.repo.list(&ctx).await?;
    Ok(Json(ListTodosResponse { todos }))
}

/// POST /todo
///
/// The body is decoded as JSON regardless of its content type.
pub async fn create_todo(State(state): State<ApiState>, body: Bytes) -> Result<StatusCode, ApiError> {
    let req: CreateTodoRequest =
        serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let ctx = state.request_context();
    state.repo.create(&ctx, &req.into_task()).await?;
    Ok(StatusCode::CREATED)
}

/// DELETE /todo/{id}
pub async fn done_todo(
    State(state): State<ApiState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(raw) = id.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let id = parse_todo_id(&raw)?;

    let ctx = state.request_context();
    state.repo.done(&ctx, id).await?;
    Ok(StatusCode::OK)
}

/// Plain decimal digits only: `u64::from_str` alone would also take a leading `+`
fn parse_todo_id(raw: &str) -> Result<u64, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::BadRequest(format!("invalid todo id: {:?}", raw)));
    }
    raw.parse()
        .map_err(|e| ApiError::BadRequest(format!("invalid todo id {:?}: {}", raw, e)))
}

/// POST /initialize
pub async fn init_todos(State(state): State<ApiState>) -> Result<StatusCode, ApiError> {
    let ctx = state.request_context();
    state.repo.init(&ctx).await?;
    Ok(StatusCode::OK)
}

/// GET /healthz
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Catch-all
pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}
