use std::path::PathBuf;

use thiserror::Error;

/// Error type definitions
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("CSV error")]
    Csv(#[from] csv::Error),

    #[error("SQL error")]
    Sql(#[from] rusqlite::Error),

    #[error("Session has been stopped; restart the session")]
    SessionStopped,

    #[error("Path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Checkpoint error: {0}")]
    Checkpoint(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Duplicate column name: {0}")]
    DuplicateColumnName(String),

    #[error("Inconsistent row count: expected {expected}, found {found}")]
    InconsistentRowCount { expected: usize, found: usize },

    #[error("Row index out of bounds: index {index}, size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("Empty data: {0}")]
    EmptyData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;
