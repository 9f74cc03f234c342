use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Columns that break downstream numeric handling even when they look
/// homogeneous in a sample.
pub const DEFAULT_FORCED_TEXT_COLUMNS: [&str; 7] = [
    "Street Num",
    "Numer",
    "Postal",
    "Exception",
    "OPLD Consignee Name",
    "Consignee Name",
    "Consignee",
];

/// Options for column normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationOptions {
    /// Columns always coerced to text (exact names).
    pub forced_text_columns: Vec<String>,

    /// Names (case-insensitive) of columns holding serial dates.
    pub date_serial_columns: Vec<String>,

    /// Names (case-insensitive) of columns holding serial times of day.
    pub time_serial_columns: Vec<String>,

    /// Day that serial values are counted from.
    pub epoch: NaiveDate,

    /// Days subtracted from a pure date serial before anchoring.
    ///
    /// Corrects the 1900 leap-year bug plus the 1-based day count.
    pub date_offset_days: i64,
}

impl Default for NormalizationOptions {
    fn default() -> Self {
        Self {
            forced_text_columns: DEFAULT_FORCED_TEXT_COLUMNS
                .iter()
                .map(ToString::to_string)
                .collect(),
            date_serial_columns: vec!["DATA".to_string()],
            time_serial_columns: vec!["TIME".to_string()],
            epoch: NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or_default(),
            date_offset_days: 2,
        }
    }
}

impl NormalizationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_forced_text_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.forced_text_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_forced_text(&self, column: &str) -> bool {
        self.forced_text_columns.iter().any(|name| name == column)
    }

    pub fn is_date_serial_column(&self, column: &str) -> bool {
        self.date_serial_columns
            .iter()
            .any(|name| name.eq_ignore_ascii_case(column))
    }

    pub fn is_time_serial_column(&self, column: &str) -> bool {
        self.time_serial_columns
            .iter()
            .any(|name| name.eq_ignore_ascii_case(column))
    }
}
