//! Error types for cistern-io.

use std::path::{Path, PathBuf};

/// Error type for all fallible operations in the cistern-io crate.
///
/// Covers missing files, CSV and Parquet failures, tables without their
/// required columns, and rows that fail validation.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error from the CSV reader or writer.
    #[error("csv error in {}: {reason}", path.display())]
    Csv {
        /// File being read or written.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Wraps an error originating from the Parquet library.
    #[error("parquet error: {reason}")]
    Parquet {
        /// Description of the underlying Parquet failure.
        reason: String,
    },

    /// Returned for a Parquet codec name other than `none`, `snappy` or `zstd`.
    #[error("unknown parquet codec: {name:?}")]
    UnknownCodec { name: String },

    /// Returned when a table lacks one or more required columns.
    #[error("{} is missing required column(s): {}", path.display(), columns.join(", "))]
    MissingColumns {
        /// File that was inspected.
        path: PathBuf,
        /// Names of the absent columns, in canonical order.
        columns: Vec<String>,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },
}

impl IoError {
    pub(crate) fn csv(path: &Path, e: impl std::fmt::Display) -> Self {
        IoError::Csv {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    }
}

impl From<parquet::errors::ParquetError> for IoError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<arrow::error::ArrowError> for IoError {
    fn from(e: arrow::error::ArrowError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}
