//! CSV reading through Polars.

use std::path::Path;

use polars::prelude::*;

use nozyk_model::{CellValue, Dataset};

use crate::cells::{CellMode, from_any_value};
use crate::error::{IngestError, Result};
use crate::headers::normalize_headers;

/// Rows used for schema inference in typed mode.
const INFER_SCHEMA_ROWS: usize = 100;

fn read_frame(path: &Path, mode: CellMode) -> Result<DataFrame> {
    let infer = match mode {
        CellMode::Typed => Some(INFER_SCHEMA_ROWS),
        // Zero inference rows reads every column as String.
        CellMode::TextOnly => Some(0),
    };
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(infer)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Reads a CSV file with a header row into a dataset.
pub(crate) fn read_csv_sheet(path: &Path, mode: CellMode) -> Result<Dataset> {
    let df = read_frame(path, mode)?;
    let columns = normalize_headers(df.get_column_names().iter().map(|name| name.as_str()));
    let mut dataset = Dataset::new(columns)?;
    let series = df.get_columns();
    for idx in 0..df.height() {
        let cells: Vec<CellValue> = series
            .iter()
            .map(|column| from_any_value(column.get(idx).unwrap_or(AnyValue::Null), mode))
            .collect();
        if cells.iter().all(CellValue::is_empty) {
            continue;
        }
        dataset.push_row(cells)?;
    }
    Ok(dataset)
}
