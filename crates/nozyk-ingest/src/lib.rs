//! Spreadsheet ingestion.
//!
//! Reads `.xlsx`, `.xlsm`, `.xls`, `.xlsb` and `.ods` workbooks with
//! calamine (every sheet) and `.csv` files with Polars (one sheet named
//! after the file) into [`Dataset`](nozyk_model::Dataset)s.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use nozyk_ingest::load_workbook;
//!
//! let workbook = load_workbook(Path::new("routes.xlsx"))?;
//! let sheet = workbook.first_sheet().expect("at least one sheet");
//! println!("{}: {} rows", sheet.name, sheet.dataset.row_count());
//! ```

mod cells;
mod csv;
mod error;
mod headers;
mod workbook;

pub use cells::CellMode;
pub use error::{IngestError, Result};
pub use headers::{normalize_header, normalize_headers};
pub use workbook::{Sheet, SourceFormat, Workbook, load_workbook};
