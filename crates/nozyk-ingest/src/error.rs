//! Error types for spreadsheet ingestion.

use std::path::PathBuf;

use nozyk_model::ModelError;
use thiserror::Error;

/// Errors that abort loading a file.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Extension is not a spreadsheet or CSV.
    #[error("unsupported file format '{extension}': {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The spreadsheet container could not be opened.
    #[error("failed to open workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// One sheet could not be turned into a dataset.
    #[error("failed to read sheet '{sheet}': {message}")]
    Sheet { sheet: String, message: String },

    /// No sheet of the file could be read.
    #[error("no readable sheet in {path}")]
    NoSheets { path: PathBuf },

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
