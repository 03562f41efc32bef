use std::path::{Path, PathBuf};

use cornershop_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error at {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Parquet error at {}: {source}", .path.display())]
    Parquet {
        path: PathBuf,
        #[source]
        source: parquet::errors::ParquetError,
    },

    #[error("failed to build record batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("JSON error at {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("column \"{column}\" is missing or has the wrong type in {}", .path.display())]
    Schema { path: PathBuf, column: String },
}

impl ExportError {
    /// Path the failing operation was working on, when there is one.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            ExportError::Io { path, .. }
            | ExportError::Csv { path, .. }
            | ExportError::Parquet { path, .. }
            | ExportError::Json { path, .. }
            | ExportError::Schema { path, .. } => Some(path),
            ExportError::Config(_) | ExportError::Arrow(_) => None,
        }
    }
}
