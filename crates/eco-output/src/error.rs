//! Error types for eco-output.

use thiserror::Error;

/// Failure while persisting agent records or census rows.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("output file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("writing CSV records failed: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "sqlite")]
    #[error("writing SQLite tables failed: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[cfg(feature = "parquet")]
    #[error("building Arrow batch failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[cfg(feature = "parquet")]
    #[error("writing Parquet file failed: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}

pub type OutputResult<T> = Result<T, OutputError>;
