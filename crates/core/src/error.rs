// Central Error Type for the Todo Service

use thiserror::Error;

/// Application-level error type shared by every backend
///
/// Callers branch on [`AppError::NotFound`]; every other variant is opaque
/// and only carries a human-readable message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("todo {0} not found")]
    NotFound(u64),

    #[error("Database error: {0}")]
    Database(String),

    #[error("context cancelled")]
    Cancelled,

    #[error("context deadline exceeded")]
    DeadlineExceeded,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// True when the error means "no live todo has that id"
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }

    /// True when the error was produced by a cancelled or expired [`crate::Context`]
    pub fn is_cancellation(&self) -> bool {
        matches!(self, AppError::Cancelled | AppError::DeadlineExceeded)
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

// Note: sqlx::Error conversion is handled in infra-sqlite
// by wrapping into AppError::Database(String) with operation context
