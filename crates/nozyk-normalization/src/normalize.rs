//! The normalization pass.
//!
//! Every column is classified and converted in turn. A failure on one column
//! falls back to text coercion for that column, and a failing fallback leaves
//! the column untouched; the pass itself never fails.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use nozyk_model::{CellValue, Dataset};

use crate::classify::{ColumnClass, classify_column};
use crate::error::{NormalizationError, Result};
use crate::options::NormalizationOptions;
use crate::serial::{serial_to_datetime, serial_to_time};

/// What happened to one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnReport {
    pub column: String,
    /// `None` when classification itself failed.
    pub class: Option<ColumnClass>,
    /// Column was coerced to text, by class, by name or by fallback.
    pub coerced_to_text: bool,
    /// Error that triggered a fallback, if any.
    pub fallback: Option<String>,
}

/// Per-column outcome of a normalization pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizationReport {
    pub columns: Vec<ColumnReport>,
}

impl NormalizationReport {
    pub fn column(&self, name: &str) -> Option<&ColumnReport> {
        self.columns.iter().find(|report| report.column == name)
    }

    pub fn fallback_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|report| report.fallback.is_some())
            .count()
    }
}

/// Normalizes a dataset with the default options.
pub fn normalize(dataset: Dataset) -> Dataset {
    normalize_with(dataset, &NormalizationOptions::default()).0
}

/// Normalizes a dataset and reports the per-column decisions.
pub fn normalize_with(
    mut dataset: Dataset,
    options: &NormalizationOptions,
) -> (Dataset, NormalizationReport) {
    let report = normalize_in_place(&mut dataset, options);
    (dataset, report)
}

/// Normalizes `dataset` in place.
pub fn normalize_in_place(
    dataset: &mut Dataset,
    options: &NormalizationOptions,
) -> NormalizationReport {
    let mut report = NormalizationReport::default();
    for index in 0..dataset.column_count() {
        let name = dataset.columns()[index].clone();
        let mut entry = ColumnReport {
            column: name.clone(),
            class: None,
            coerced_to_text: false,
            fallback: None,
        };

        let outcome = classify_column(dataset, index, options).and_then(|class| {
            entry.class = Some(class);
            apply_class(dataset, index, class, options)
        });
        match outcome {
            Ok(coerced) => entry.coerced_to_text = coerced,
            Err(error) => {
                warn!(column = %name, %error, "column conversion failed, coercing to text");
                entry.fallback = Some(error.to_string());
                entry.coerced_to_text = coerce_or_keep(dataset, index, &name);
            }
        }

        if options.is_forced_text(&name) && !entry.coerced_to_text {
            entry.coerced_to_text = coerce_or_keep(dataset, index, &name);
        }
        debug!(
            column = %name,
            class = ?entry.class,
            coerced = entry.coerced_to_text,
            "normalized column"
        );
        report.columns.push(entry);
    }
    report
}

/// Applies the conversion for `class`; returns whether the column became text.
fn apply_class(
    dataset: &mut Dataset,
    index: usize,
    class: ColumnClass,
    options: &NormalizationOptions,
) -> Result<bool> {
    match class {
        ColumnClass::Plain => Ok(false),
        ColumnClass::Mixed => {
            coerce_to_text(dataset, index)?;
            Ok(true)
        }
        ColumnClass::DateSerial => {
            convert_serial(dataset, index, |serial| {
                serial_to_datetime(serial, options.epoch, options.date_offset_days)
                    .map(CellValue::DateTime)
            })?;
            Ok(false)
        }
        ColumnClass::TimeSerial => {
            convert_serial(dataset, index, |serial| {
                serial_to_time(serial, options.epoch).map(CellValue::Time)
            })?;
            Ok(false)
        }
    }
}

/// Converts every numeric cell with `convert`; the column is only replaced
/// when all cells convert.
fn convert_serial<F>(dataset: &mut Dataset, index: usize, convert: F) -> Result<()>
where
    F: Fn(f64) -> Option<CellValue>,
{
    let column = dataset
        .columns()
        .get(index)
        .cloned()
        .ok_or(NormalizationError::ColumnMissing(index))?;
    let mut converted = Vec::with_capacity(dataset.row_count());
    for value in dataset.column_values(index) {
        let cell = match value {
            CellValue::Number(serial) => convert(*serial).ok_or_else(|| {
                NormalizationError::SerialOutOfRange {
                    column: column.clone(),
                    value: *serial,
                }
            })?,
            other => other.clone(),
        };
        converted.push(cell);
    }
    dataset.replace_column(index, converted)?;
    Ok(())
}

/// Renders every value of the column as text. Empty cells stay empty.
pub fn coerce_to_text(dataset: &mut Dataset, index: usize) -> Result<()> {
    if index >= dataset.column_count() {
        return Err(NormalizationError::ColumnMissing(index));
    }
    let values: Vec<CellValue> = dataset
        .column_values(index)
        .cloned()
        .map(CellValue::into_text)
        .collect();
    dataset.replace_column(index, values)?;
    Ok(())
}

fn coerce_or_keep(dataset: &mut Dataset, index: usize, name: &str) -> bool {
    match coerce_to_text(dataset, index) {
        Ok(()) => true,
        Err(error) => {
            warn!(column = %name, %error, "text coercion failed, leaving column untouched");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::*;

    fn single(name: &str, values: Vec<CellValue>) -> Dataset {
        Dataset::from_rows([name], values.into_iter().map(|v| vec![v]).collect()).unwrap()
    }

    #[test]
    fn mixed_column_becomes_text() {
        let ds = single(
            "Notes",
            vec![CellValue::Number(12.0), CellValue::text("x"), CellValue::Empty],
        );
        let (ds, report) = normalize_with(ds, &NormalizationOptions::default());
        let values: Vec<&CellValue> = ds.column_values(0).collect();
        assert_eq!(
            values,
            vec![&CellValue::text("12"), &CellValue::text("x"), &CellValue::Empty]
        );
        assert_eq!(report.columns[0].class, Some(ColumnClass::Mixed));
        assert!(report.columns[0].coerced_to_text);
    }

    #[test]
    fn forced_column_becomes_text_even_when_homogeneous() {
        let ds = single("Postal", vec![CellValue::Number(50001.0), CellValue::Number(50002.0)]);
        let (ds, report) = normalize_with(ds, &NormalizationOptions::default());
        assert_eq!(ds.value(0, "Postal"), Some(&CellValue::text("50001")));
        assert_eq!(report.columns[0].class, Some(ColumnClass::Plain));
        assert!(report.columns[0].coerced_to_text);
    }

    #[test]
    fn date_serial_column_becomes_datetime() {
        let ds = single("DATA", vec![CellValue::Number(2.0), CellValue::Number(44.0)]);
        let ds = normalize(ds);
        let midnight = NaiveTime::MIN;
        assert_eq!(
            ds.value(0, "DATA"),
            Some(&CellValue::DateTime(
                NaiveDate::from_ymd_opt(1900, 1, 1).unwrap().and_time(midnight)
            ))
        );
        assert_eq!(
            ds.value(1, "DATA"),
            Some(&CellValue::DateTime(
                NaiveDate::from_ymd_opt(1900, 2, 12).unwrap().and_time(midnight)
            ))
        );
    }

    #[test]
    fn time_serial_column_becomes_time() {
        let ds = single("TIME", vec![CellValue::Number(0.5), CellValue::Empty]);
        let ds = normalize(ds);
        assert_eq!(
            ds.value(0, "TIME"),
            Some(&CellValue::Time(NaiveTime::from_hms_opt(12, 0, 0).unwrap()))
        );
        assert_eq!(ds.value(1, "TIME"), Some(&CellValue::Empty));
    }

    #[test]
    fn out_of_range_serial_falls_back_to_text() {
        let ds = single("DATA", vec![CellValue::Number(45353.0), CellValue::Number(1e12)]);
        let (ds, report) = normalize_with(ds, &NormalizationOptions::default());
        assert_eq!(ds.value(0, "DATA"), Some(&CellValue::text("45353")));
        assert_eq!(ds.value(1, "DATA"), Some(&CellValue::text("1000000000000")));
        assert_eq!(report.fallback_count(), 1);
        assert!(report.columns[0].coerced_to_text);
    }
}
