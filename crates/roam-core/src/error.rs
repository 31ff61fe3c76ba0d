//! Error types for the itinerary store.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// A start date that is not an ISO calendar date
    #[error("Invalid date '{value}': {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: jiff::Error,
    },
    /// Request body that is not valid JSON or has mistyped values
    #[error("Invalid request body: {source}")]
    InvalidBody {
        #[source]
        source: serde_json::Error,
    },
    /// Trip not found for the given ID
    #[error("Trip with ID {id} not found")]
    TripNotFound { id: u64 },
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Blocking persistence task panicked or was cancelled
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// Coarse classification of a [`StoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input; the caller must fix the request.
    Validation,
    /// Unknown trip id.
    NotFound,
    /// The backend failed to commit; the operation did not happen.
    Persistence,
}

impl ErrorKind {
    /// HTTP status code an HTTP front end should answer with.
    pub fn http_status(self) -> u16 {
        match self {
            ErrorKind::Validation => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Persistence => 500,
        }
    }
}

/// Builder for creating database errors with optional context.
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
    pub fn with_source(self, source: rusqlite::Error) -> StoreError {
        StoreError::Database {
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
    pub fn with_reason(self, reason: impl Into<String>) -> StoreError {
        StoreError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl StoreError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps an I/O error with the path it happened at.
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Classifies the error into validation, not-found or persistence.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::InvalidInput { .. }
            | StoreError::InvalidDate { .. }
            | StoreError::InvalidBody { .. } => ErrorKind::Validation,
            StoreError::TripNotFound { .. } => ErrorKind::NotFound,
            StoreError::Database { .. }
            | StoreError::FileSystem { .. }
            | StoreError::XdgDirectory(_)
            | StoreError::Serialization { .. }
            | StoreError::TaskJoin(_) => ErrorKind::Persistence,
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| StoreError::database(message).with_source(e))
    }
}

/// Extension trait attaching a path to I/O failures.
pub trait IoResultExt<T> {
    /// Map I/O errors to [`StoreError::FileSystem`] at `path`.
    fn fs_context(self, path: &std::path::Path) -> Result<T>;
}

impl<T> IoResultExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, path: &std::path::Path) -> Result<T> {
        self.map_err(|e| StoreError::file_system(path, e))
    }
}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
