//! Corpus store error types.

use std::path::PathBuf;

/// Errors that can occur in the corpus storage layer.
#[derive(Debug, thiserror::Error)]
pub enum LakeError {
    /// `DuckDB` operation failed.
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    /// I/O error reading an archive file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive file is not valid crossword JSON.
    #[error("invalid archive JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Stored or imported data violates a domain rule.
    #[error(transparent)]
    Core(#[from] xw_core::CoreError),

    /// A stored value could not be converted back into a record.
    #[error("invalid record in {table}: {reason}")]
    InvalidRecord { table: &'static str, reason: String },
}
