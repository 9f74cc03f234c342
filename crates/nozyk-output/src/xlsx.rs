//! XLSX serialization.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rust_xlsxwriter::{Format, Workbook};

use tracing::debug;

use nozyk_model::{CellValue, Dataset};

use crate::error::{OutputError, Result};

/// Longest sheet name a workbook accepts.
const MAX_SHEET_NAME: usize = 31;
const SECONDS_PER_DAY: f64 = 86_400.0;
const DATETIME_NUM_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";
const TIME_NUM_FORMAT: &str = "hh:mm:ss";

/// Serializes `dataset` as a single-sheet workbook.
pub fn to_xlsx_bytes(dataset: &Dataset, sheet_name: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(safe_sheet_name(sheet_name))?;

    let header = Format::new().set_bold();
    let datetime = Format::new().set_num_format(DATETIME_NUM_FORMAT);
    let time = Format::new().set_num_format(TIME_NUM_FORMAT);

    for (col, name) in dataset.columns().iter().enumerate() {
        worksheet.write_string_with_format(0, xlsx_column(col)?, name, &header)?;
    }
    for (idx, row) in dataset.rows().iter().enumerate() {
        let r = xlsx_row(idx + 1)?;
        for (col, cell) in row.cells.iter().enumerate() {
            let c = xlsx_column(col)?;
            match cell {
                CellValue::Empty => {}
                CellValue::Text(text) => {
                    worksheet.write_string(r, c, text)?;
                }
                CellValue::Number(value) => {
                    worksheet.write_number(r, c, *value)?;
                }
                CellValue::Bool(value) => {
                    worksheet.write_boolean(r, c, *value)?;
                }
                CellValue::DateTime(value) => {
                    worksheet.write_number_with_format(r, c, datetime_serial(*value), &datetime)?;
                }
                CellValue::Time(value) => {
                    worksheet.write_number_with_format(r, c, time_serial(*value), &time)?;
                }
            }
        }
    }
    let bytes = workbook.save_to_buffer()?;
    debug!(
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        bytes = bytes.len(),
        "rendered xlsx"
    );
    Ok(bytes)
}

fn xlsx_column(index: usize) -> Result<u16> {
    u16::try_from(index).map_err(|_| OutputError::TooManyColumns { count: index + 1 })
}

fn xlsx_row(index: usize) -> Result<u32> {
    u32::try_from(index).map_err(|_| OutputError::TooManyRows { count: index })
}

/// Spreadsheet serial of a date-time (1900 date system).
pub fn datetime_serial(value: NaiveDateTime) -> f64 {
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)
        .unwrap_or(NaiveDate::MIN)
        .and_time(NaiveTime::MIN);
    (value - base).num_milliseconds() as f64 / (SECONDS_PER_DAY * 1000.0)
}

/// Fraction of a day.
pub fn time_serial(value: NaiveTime) -> f64 {
    f64::from(value.num_seconds_from_midnight()) / SECONDS_PER_DAY
}

/// Strips characters a sheet name may not contain and truncates it.
pub fn safe_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|ch| !matches!(ch, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(MAX_SHEET_NAME)
        .collect();
    let cleaned = cleaned.trim_matches('\'').trim().to_string();
    if cleaned.is_empty() {
        "Sheet1".to_string()
    } else {
        cleaned
    }
}
