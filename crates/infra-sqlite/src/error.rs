// sqlx::Error -> AppError mapping

use todo_core::AppError;

/// Wrap a sqlx error with the failing operation, keeping the SQLite result code
pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => match db_err.code() {
            // SQLite result codes: https://www.sqlite.org/rescode.html
            Some(code) => match code.as_ref() {
                "5" => AppError::Database(format!(
                    "{}: database locked (SQLITE_BUSY): {}",
                    operation,
                    db_err.message()
                )),
                "13" => AppError::Database(format!(
                    "{}: database full: {}",
                    operation,
                    db_err.message()
                )),
                other => AppError::Database(format!(
                    "{}: database error [{}]: {}",
                    operation,
                    other,
                    db_err.message()
                )),
            },
            None => AppError::Database(format!("{}: {}", operation, db_err.message())),
        },
        // Connection, pool, protocol errors
        _ => AppError::Database(format!("{}: {}", operation, err)),
    }
}
