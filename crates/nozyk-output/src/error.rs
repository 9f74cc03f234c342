//! Error types for exports.

use std::path::PathBuf;

use nozyk_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX write failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{count} columns exceed the XLSX column index range")]
    TooManyColumns { count: usize },

    #[error("{count} rows exceed the XLSX row index range")]
    TooManyRows { count: usize },

    #[error("export is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("unknown export format '{0}', expected csv or xlsx")]
    UnknownFormat(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, OutputError>;
