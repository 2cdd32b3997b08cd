//! Error types for dtb-core

use thiserror::Error;

/// Core error type for datebound
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Column type name not recognized
    #[error("[E001] Unknown column type '{name}' (expected timestamp, date or datetime)")]
    UnknownColumnType { name: String },

    /// E002: Interval unit name not recognized
    #[error("[E002] Unknown interval unit '{name}' (expected days, hours, minutes or seconds)")]
    UnknownIntervalUnit { name: String },

    /// E003: Function name not recognized
    #[error("[E003] Unknown function '{name}' (expected ADDDATE, SUBDATE, ADDTIME or SUBTIME)")]
    UnknownFunction { name: String },

    /// E004: Composite duration literal could not be parsed
    #[error("[E004] Invalid duration literal {literal}: {reason}")]
    InvalidDurationLiteral { literal: String, reason: String },

    /// E005: Config file not found
    #[error("[E005] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E006: Failed to parse configuration file
    #[error("[E006] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E007: Invalid configuration value
    #[error("[E007] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E008: Connection string could not be interpreted
    #[error("[E008] Invalid DSN '{dsn}': {reason}")]
    InvalidDsn { dsn: String, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
