use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors. Any of these aborts the current command.
#[derive(Error, Debug)]
pub enum MovieDbError {
    #[error("Database \"{}\" has not been initialized", .0.display())]
    DatabaseNotInitialized(PathBuf),

    #[error("Data directory error: {0}")]
    DataDirectory(String),

    #[error("Unexpected data file found in data directory: {0}")]
    UnexpectedDataFile(String),

    #[error("Required data file is missing: {0}")]
    MissingDataFile(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Invalid query number: {0} (expected 1-6)")]
    InvalidQuery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MovieDbError>;

/// Recoverable, per-row failures. The row is reported and loading moves on.
#[derive(Error, Debug)]
pub enum RowError {
    #[error("expected {expected} fields, found {found}")]
    Malformed { expected: usize, found: usize },

    #[error("not a number: {0:?}")]
    InvalidNumber(String),

    #[error("statement affected {0} rows, expected 1")]
    RowsAffected(usize),

    #[error("statement failed: {0}")]
    Statement(#[from] rusqlite::Error),
}
