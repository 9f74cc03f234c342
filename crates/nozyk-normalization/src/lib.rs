//! Column normalization for spreadsheet datasets.
//!
//! This crate provides:
//! - **classify**: per-column classification (mixed, serial date, serial time, plain)
//! - **serial**: spreadsheet serial number to date/time conversion
//! - **normalize**: the normalization pass with its fallback chain
//! - **options**: the configurable column lists and epoch anchor
//!
//! # Example
//!
//! ```ignore
//! use nozyk_normalization::{normalize_with, NormalizationOptions};
//!
//! let (dataset, report) = normalize_with(raw, &NormalizationOptions::default());
//! for column in &report.columns {
//!     println!("{}: {:?}", column.column, column.class);
//! }
//! ```

pub mod classify;
mod error;
mod normalize;
mod options;
pub mod serial;

pub use classify::{ColumnClass, classify_column, value_kinds};
pub use error::{NormalizationError, Result};
pub use normalize::{
    ColumnReport, NormalizationReport, coerce_to_text, normalize, normalize_in_place,
    normalize_with,
};
pub use options::{DEFAULT_FORCED_TEXT_COLUMNS, NormalizationOptions};
