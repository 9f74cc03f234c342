use nozyk_model::{CellValue, Dataset, SummaryRow};

use crate::error::Result;

pub const DRIVER_COLUMN: &str = "Driver ID";
pub const EXCEPTION_COUNT_COLUMN: &str = "Exception Count";
pub const OTHER_CITIES_COLUMN: &str = "Other Cities";
pub const TOTAL_ROWS_COLUMN: &str = "Total Rows";

/// Tabular form of the per-driver summary, one row per [`SummaryRow`].
///
/// The home-city count column is named after `home_city`.
pub fn summary_dataset(rows: &[SummaryRow], home_city: &str) -> Result<Dataset> {
    let dataset = Dataset::from_rows(
        [
            DRIVER_COLUMN,
            EXCEPTION_COUNT_COLUMN,
            home_city,
            OTHER_CITIES_COLUMN,
            TOTAL_ROWS_COLUMN,
        ],
        rows.iter()
            .map(|row| {
                vec![
                    CellValue::text(row.display_label()),
                    count(row.exception_count),
                    count(row.home_city_count),
                    count(row.other_city_count),
                    count(row.total_rows),
                ]
            })
            .collect(),
    )?;
    Ok(dataset)
}

fn count(value: usize) -> CellValue {
    CellValue::Number(value as f64)
}
