//! HTTP Error Mapping
//!
//! NotFound becomes 404, bad input 400, everything else 500.
//! The body is always the error text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use todo_core::AppError;

/// Error returned by handlers
#[derive(Debug)]
pub enum ApiError {
    /// Request could not be parsed
    BadRequest(String),
    /// Repository failure
    App(AppError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::App(AppError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::App(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError::App(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::App(err) => err.to_string(),
        };
        (status, body).into_response()
    }
}
