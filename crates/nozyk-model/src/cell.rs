//! Dynamically typed spreadsheet cells.
//!
//! A spreadsheet column can hold numbers, text and dates side by side. Each
//! cell is therefore a tagged variant; the normalizer later picks (or
//! coerces to) a single variant per column.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Render format for date-time cells.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render format for time-of-day cells.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
}

/// Run-time type of a non-empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Text,
    Number,
    Bool,
    DateTime,
    Time,
}

impl CellKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CellKind::Text => "text",
            CellKind::Number => "number",
            CellKind::Bool => "bool",
            CellKind::DateTime => "datetime",
            CellKind::Time => "time",
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CellValue {
    /// Builds a text cell, mapping the empty string to [`CellValue::Empty`].
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value)
        }
    }

    /// Returns the run-time kind, or `None` for an empty cell.
    pub fn kind(&self) -> Option<CellKind> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(_) => Some(CellKind::Text),
            CellValue::Number(_) => Some(CellKind::Number),
            CellValue::Bool(_) => Some(CellKind::Bool),
            CellValue::DateTime(_) => Some(CellKind::DateTime),
            CellValue::Time(_) => Some(CellKind::Time),
        }
    }

    /// True for missing values and empty text.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Interprets the cell as a finite floating-point number.
    ///
    /// Text is trimmed and a decimal comma is accepted (`52,1`).
    pub fn to_f64(&self) -> Option<f64> {
        let value = match self {
            CellValue::Number(value) => Some(*value),
            CellValue::Text(text) => parse_f64(text),
            _ => None,
        }?;
        value.is_finite().then_some(value)
    }

    /// Calendar date of the cell, when it has one.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::DateTime(value) => Some(value.date()),
            CellValue::Text(text) => parse_date_text(text),
            _ => None,
        }
    }

    /// String representation used for coercion, display and export.
    ///
    /// Empty cells render as the empty string.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(text) => text.clone(),
            CellValue::Number(value) => format_numeric(*value),
            CellValue::Bool(value) => if *value { "TRUE" } else { "FALSE" }.to_string(),
            CellValue::DateTime(value) => value.format(DATETIME_FORMAT).to_string(),
            CellValue::Time(value) => value.format(TIME_FORMAT).to_string(),
        }
    }

    /// Converts the cell to its text form, keeping empties empty.
    pub fn into_text(self) -> CellValue {
        match self {
            CellValue::Text(_) | CellValue::Empty => self,
            other => CellValue::text(other.to_text()),
        }
    }

    /// Key used when comparing cells for duplicate detection.
    ///
    /// Empty values compare equal to each other and distinct from any text.
    pub fn dedupe_key(&self) -> String {
        match self.kind() {
            None => "\u{0}".to_string(),
            Some(kind) => format!("{}:{}", kind.as_str(), self.to_text()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::text(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::DateTime(value)
    }
}

/// Formats a floating-point number as a string without trailing zeros.
///
/// # Examples
///
/// ```
/// use nozyk_model::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.5), "1.5");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parses a string as `f64`, returning `None` for invalid or empty strings.
///
/// A single decimal comma is accepted when no decimal point is present.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = trimmed.parse::<f64>() {
        return Some(parsed);
    }
    if !trimmed.contains('.') && trimmed.matches(',').count() == 1 {
        return trimmed.replace(',', ".").parse::<f64>().ok();
    }
    None
}

/// Parses the date part of a textual date or date-time.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD` and `DD.MM.YYYY`, optionally followed
/// by a time component separated by a space or `T`.
pub fn parse_date_text(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let date_part = trimmed
        .split(|ch: char| ch == ' ' || ch == 'T')
        .next()
        .unwrap_or(trimmed);
    ["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_constructor_maps_empty_string() {
        assert_eq!(CellValue::text(""), CellValue::Empty);
        assert_eq!(CellValue::text("a"), CellValue::Text("a".to_string()));
    }

    #[test]
    fn to_text_renders_each_kind() {
        assert_eq!(CellValue::Empty.to_text(), "");
        assert_eq!(CellValue::Number(12.0).to_text(), "12");
        assert_eq!(CellValue::Number(-3.25).to_text(), "-3.25");
        assert_eq!(CellValue::Bool(true).to_text(), "TRUE");
        let dt = NaiveDate::from_ymd_opt(2024, 3, 2)
            .unwrap()
            .and_hms_opt(8, 5, 0)
            .unwrap();
        assert_eq!(CellValue::DateTime(dt).to_text(), "2024-03-02 08:05:00");
        let t = NaiveTime::from_hms_opt(14, 30, 0).unwrap();
        assert_eq!(CellValue::Time(t).to_text(), "14:30:00");
    }

    #[test]
    fn format_numeric_keeps_integers_intact() {
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(500000.0), "500000");
        assert_eq!(format_numeric(-0.0), "-0");
    }

    #[test]
    fn parse_f64_accepts_decimal_comma() {
        assert_eq!(parse_f64(" 52.5 "), Some(52.5));
        assert_eq!(parse_f64("52,5"), Some(52.5));
        assert_eq!(parse_f64("1,000,5"), None);
        assert_eq!(parse_f64(""), None);
        assert_eq!(parse_f64("abc"), None);
    }

    #[test]
    fn to_f64_rejects_non_finite() {
        assert_eq!(CellValue::Number(f64::NAN).to_f64(), None);
        assert_eq!(CellValue::text("NaN").to_f64(), None);
        assert_eq!(CellValue::text("inf").to_f64(), None);
        assert_eq!(CellValue::text("17").to_f64(), Some(17.0));
    }

    #[test]
    fn date_reads_datetime_and_text() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        assert_eq!(CellValue::text("2024-03-02").date(), Some(expected));
        assert_eq!(CellValue::text("2024-03-02 10:00:00").date(), Some(expected));
        assert_eq!(CellValue::text("02.03.2024").date(), Some(expected));
        assert_eq!(
            CellValue::DateTime(expected.and_hms_opt(0, 0, 0).unwrap()).date(),
            Some(expected)
        );
        assert_eq!(CellValue::Number(45353.0).date(), None);
    }

    #[test]
    fn dedupe_key_separates_kinds() {
        assert_ne!(
            CellValue::Number(12.0).dedupe_key(),
            CellValue::text("12").dedupe_key()
        );
        assert_eq!(CellValue::Empty.dedupe_key(), CellValue::Empty.dedupe_key());
        assert_ne!(CellValue::Empty.dedupe_key(), CellValue::text("x").dedupe_key());
    }
}
