use std::fmt;

use thiserror::Error;

/// Error code attached to a driver-raised error.
/// MySQL reports numeric vendor codes, PostgreSQL reports SQLSTATE strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    Numeric(i64),
    SqlState(String),
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Numeric(code) => write!(f, "{}", code),
            ErrorCode::SqlState(state) => f.write_str(state),
        }
    }
}

/// An execution error raised by the gateway driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverError {
    pub code: Option<ErrorCode>,
    pub message: String,
}

impl DriverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "[{}] {}", code, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Error type for adars operations
#[derive(Debug, Error)]
pub enum AdaError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Driver error: {0}")]
    Driver(DriverError),

    #[error("Expected {expected} row(s), got {actual}")]
    UnexpectedRowCount { expected: usize, actual: usize },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Cannot convert {value:?} for {sql_type}: {reason}")]
    Conversion {
        sql_type: String,
        value: String,
        reason: String,
    },

    #[error("Type mismatch for {sql_type}: expected {expected}, got {actual}")]
    TypeMismatch {
        sql_type: String,
        expected: &'static str,
        actual: String,
    },

    #[error("Column type {sql_type} is not supported by dialect {dialect}")]
    UnsupportedType { dialect: String, sql_type: String },

    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),

    #[error("Invalid connection URL: {0}")]
    InvalidUrl(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AdaError {
    pub(crate) fn conversion(
        sql_type: impl Into<String>,
        value: impl fmt::Debug,
        reason: impl fmt::Display,
    ) -> Self {
        AdaError::Conversion {
            sql_type: sql_type.into(),
            value: format!("{:?}", value),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn type_mismatch(
        sql_type: impl Into<String>,
        expected: &'static str,
        actual: impl fmt::Debug,
    ) -> Self {
        AdaError::TypeMismatch {
            sql_type: sql_type.into(),
            expected,
            actual: format!("{:?}", actual),
        }
    }
}

impl From<DriverError> for AdaError {
    fn from(err: DriverError) -> Self {
        AdaError::Driver(err)
    }
}

/// Result type alias for adars operations
pub type Result<T> = std::result::Result<T, AdaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_error_display() {
        let err = DriverError::new("duplicate key").with_code(ErrorCode::SqlState("23505".into()));
        assert_eq!(err.to_string(), "[23505] duplicate key");
        assert_eq!(DriverError::new("boom").to_string(), "boom");
    }

    #[test]
    fn test_driver_error_passes_through() {
        let err: AdaError = DriverError::new("Duplicate entry")
            .with_code(ErrorCode::Numeric(1062))
            .into();
        match err {
            AdaError::Driver(inner) => assert_eq!(inner.code, Some(ErrorCode::Numeric(1062))),
            _ => panic!("Expected Driver error"),
        }
    }
}
