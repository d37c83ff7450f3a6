use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading fixture data.
///
/// Aggregation and view building never produce these: a missing record
/// degrades to "no data", it is not an error.
#[derive(Error, Debug)]
pub enum DashError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cannot read {path}: {source}")]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type DashResult<T> = Result<T, DashError>;
