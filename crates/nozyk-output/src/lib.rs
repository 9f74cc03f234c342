//! Export of datasets and driver summaries.
//!
//! CSV goes through the `csv` crate, XLSX through `rust_xlsxwriter`.
//! Date-times and times are written to XLSX as spreadsheet serials with a
//! number format, so they stay sortable in the spreadsheet.

mod common;
mod csv;
mod error;
mod naming;
mod summary;
mod xlsx;

pub use common::{ensure_parent_dir, write_bytes};
pub use csv::{to_csv_string, write_csv, write_csv_file};
pub use error::{OutputError, Result};
pub use naming::{ExportFormat, export_file_name};
pub use summary::{
    DRIVER_COLUMN, EXCEPTION_COUNT_COLUMN, OTHER_CITIES_COLUMN, TOTAL_ROWS_COLUMN, summary_dataset,
};
pub use xlsx::{datetime_serial, safe_sheet_name, time_serial, to_xlsx_bytes};
