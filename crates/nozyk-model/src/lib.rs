//! Data model for the nozyk spreadsheet explorer.
//!
//! - **cell**: dynamically typed cell values and their text rendering
//! - **dataset**: row-oriented tables with a fixed, unique column set
//! - **columns**: well-known column names of delivery exports
//! - **summary**: per-driver summary rows

pub mod cell;
pub mod columns;
pub mod dataset;
pub mod error;
pub mod summary;

pub use cell::{CellKind, CellValue, format_numeric, parse_date_text, parse_f64};
pub use columns::find_date_column;
pub use dataset::{Dataset, Row};
pub use error::{ModelError, Result};
pub use summary::SummaryRow;
