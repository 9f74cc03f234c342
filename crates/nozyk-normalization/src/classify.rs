//! Column classification.
//!
//! Classification is derived from the cell values every time a dataset is
//! normalized; nothing is cached beside the dataset.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use nozyk_model::{CellKind, CellValue, Dataset};

use crate::error::{NormalizationError, Result};
use crate::options::NormalizationOptions;

/// How a column is treated by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnClass {
    /// Non-empty values of more than one kind; coerced to text.
    Mixed,
    /// Date column stored as serial numbers.
    DateSerial,
    /// Time-of-day column stored as serial numbers.
    TimeSerial,
    /// Left as is.
    Plain,
}

impl fmt::Display for ColumnClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ColumnClass::Mixed => "mixed",
            ColumnClass::DateSerial => "date serial",
            ColumnClass::TimeSerial => "time serial",
            ColumnClass::Plain => "plain",
        };
        f.write_str(label)
    }
}

/// Distinct kinds among the non-empty values of a column.
pub fn value_kinds<'a, I>(values: I) -> BTreeSet<CellKind>
where
    I: IntoIterator<Item = &'a CellValue>,
{
    values.into_iter().filter_map(CellValue::kind).collect()
}

/// Classifies the column at `index`.
pub fn classify_column(
    dataset: &Dataset,
    index: usize,
    options: &NormalizationOptions,
) -> Result<ColumnClass> {
    let name = dataset
        .columns()
        .get(index)
        .ok_or(NormalizationError::ColumnMissing(index))?;
    let kinds = value_kinds(dataset.column_values(index));
    let numeric = kinds.len() == 1 && kinds.contains(&CellKind::Number);

    if numeric && options.is_date_serial_column(name) {
        return Ok(ColumnClass::DateSerial);
    }
    if numeric && options.is_time_serial_column(name) {
        return Ok(ColumnClass::TimeSerial);
    }
    if kinds.len() > 1 {
        return Ok(ColumnClass::Mixed);
    }
    Ok(ColumnClass::Plain)
}
