//! Errors raised while classifying or converting a column.
//!
//! None of these escape [`crate::normalize`]; they select a fallback.

use thiserror::Error;

use nozyk_model::ModelError;

#[derive(Debug, Error, PartialEq)]
pub enum NormalizationError {
    /// Column index does not exist in the dataset.
    #[error("column #{0} not found")]
    ColumnMissing(usize),

    /// Serial value cannot be represented as a date/time.
    #[error("serial value {value} in column '{column}' is out of range")]
    SerialOutOfRange { column: String, value: f64 },

    /// Dataset rejected the converted column.
    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, NormalizationError>;
