//! Error types for dtb-test

use thiserror::Error;

/// Harness errors that abort a run
///
/// A case whose update disagrees with its expected validity is not an error
/// here; it is reported through a failed `CaseResult`.
#[derive(Error, Debug)]
pub enum RunError {
    /// R001: A setup statement (session, drop, create, insert) failed
    #[error("[R001] Setup statement failed: {statement}\n  error: {message}")]
    Setup { statement: String, message: String },

    /// R002: Scratch table name cannot be used in statements
    #[error("[R002] Invalid table name '{0}'")]
    InvalidTable(String),

    /// R003: The update never reached a verdict from the server
    #[error("[R003] Update interrupted: {statement}\n  error: {message}")]
    UpdateInterrupted { statement: String, message: String },
}

/// Result type alias for RunError
pub type RunResult<T> = Result<T, RunError>;
