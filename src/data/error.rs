use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a source file into a [`LaunchDataset`](super::model::LaunchDataset).
///
/// Raised only at startup; once a dataset is loaded nothing downstream fails.
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}, column '{column}': invalid value '{value}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

impl DataLoadError {
    pub(crate) fn invalid(row: usize, column: &str, value: impl ToString) -> Self {
        DataLoadError::InvalidValue {
            row,
            column: column.to_string(),
            value: value.to_string(),
        }
    }
}
