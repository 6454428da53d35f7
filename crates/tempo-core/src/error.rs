//! Error types for the tempo core library.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for all tracker operations.
///
/// Delivery failures for individual push endpoints are not errors. They are
/// reported as [`crate::push::DeliveryOutcome`] values and never fail an
/// operation.
#[derive(Error, Debug)]
pub enum TempoError {
    /// Persistence unavailable or a query failed
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// The task could not be created or updated
    #[error("Task '{task_id}' not found")]
    TaskNotFound { task_id: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> TempoError {
        TempoError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> TempoError {
        TempoError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl TempoError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Whether the error was caused by the caller rather than the system.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::TaskNotFound { .. })
    }
}

/// Extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| TempoError::database(message).with_source(e))
    }
}

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TempoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_builder() {
        let err = TempoError::invalid_input("delta_minutes").with_reason("must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'delta_minutes': must be positive"
        );
        assert!(err.is_caller_error());
    }

    #[test]
    fn test_db_context_wraps_source() {
        let res: std::result::Result<(), rusqlite::Error> =
            Err(rusqlite::Error::QueryReturnedNoRows);
        let err = res.db_context("Failed to read task").unwrap_err();
        assert!(matches!(err, TempoError::Database { .. }));
        assert!(!err.is_caller_error());
        assert_eq!(err.to_string(), "Database error: Failed to read task");
    }
}
