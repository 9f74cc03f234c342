//! Conversion of container cell values into [`CellValue`]s.

use calamine::{Data, DataType};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use polars::prelude::AnyValue;

use nozyk_model::{CellValue, format_numeric};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// How sheet cells are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellMode {
    /// Keep numbers, booleans and dates typed.
    Typed,
    /// Render every cell as text.
    TextOnly,
}

/// Maps a spreadsheet cell.
pub fn from_calamine(cell: &Data, mode: CellMode) -> CellValue {
    let typed = match cell {
        Data::Empty => CellValue::Empty,
        Data::String(value) => CellValue::text(value.as_str()),
        Data::Int(value) => CellValue::Number(*value as f64),
        Data::Float(value) => CellValue::Number(*value),
        Data::Bool(value) => CellValue::Bool(*value),
        Data::DateTime(value) => {
            let serial = value.as_f64();
            if value.is_duration() || (0.0..1.0).contains(&serial) {
                time_of_day(serial).map_or(CellValue::Number(serial), CellValue::Time)
            } else {
                cell.as_datetime()
                    .map_or(CellValue::Number(serial), CellValue::DateTime)
            }
        }
        Data::DateTimeIso(value) => parse_iso_datetime(value)
            .map_or_else(|| CellValue::text(value.as_str()), CellValue::DateTime),
        Data::DurationIso(value) => CellValue::text(value.as_str()),
        Data::Error(error) => CellValue::text(error.to_string()),
    };
    match mode {
        CellMode::Typed => typed,
        CellMode::TextOnly => typed.into_text(),
    }
}

/// Maps a Polars value read from CSV.
pub fn from_any_value(value: AnyValue<'_>, mode: CellMode) -> CellValue {
    let typed = match value {
        AnyValue::Null => CellValue::Empty,
        AnyValue::Boolean(v) => CellValue::Bool(v),
        AnyValue::Int8(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int16(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int32(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int64(v) => CellValue::Number(v as f64),
        AnyValue::UInt8(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt16(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt32(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt64(v) => CellValue::Number(v as f64),
        AnyValue::Float32(v) => CellValue::Number(f64::from(v)),
        AnyValue::Float64(v) => CellValue::Number(v),
        AnyValue::String(s) => CellValue::text(s),
        AnyValue::StringOwned(s) => CellValue::text(s.as_str()),
        other => CellValue::text(other.to_string()),
    };
    match mode {
        CellMode::Typed => typed,
        CellMode::TextOnly => typed.into_text(),
    }
}

/// Time of day of the fractional part of a serial value.
fn time_of_day(serial: f64) -> Option<NaiveTime> {
    if !serial.is_finite() {
        return None;
    }
    let seconds = (serial.fract().abs() * SECONDS_PER_DAY).round() as u32 % 86_400;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
}

fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    const FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ];
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// Header text of a raw header cell.
pub fn header_text(cell: &Data) -> String {
    match cell {
        Data::Float(value) => format_numeric(*value),
        Data::Int(value) => value.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_cells() {
        assert_eq!(from_calamine(&Data::Empty, CellMode::Typed), CellValue::Empty);
        assert_eq!(
            from_calamine(&Data::String(String::new()), CellMode::Typed),
            CellValue::Empty
        );
        assert_eq!(from_calamine(&Data::Int(12), CellMode::Typed), CellValue::Number(12.0));
        assert_eq!(
            from_calamine(&Data::Float(12.0), CellMode::TextOnly),
            CellValue::text("12")
        );
        assert_eq!(from_calamine(&Data::Bool(true), CellMode::Typed), CellValue::Bool(true));
    }

    #[test]
    fn test_iso_datetime_cell() {
        let cell = Data::DateTimeIso("2024-03-02T08:30:00".to_string());
        let expected = NaiveDate::from_ymd_opt(2024, 3, 2)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        assert_eq!(from_calamine(&cell, CellMode::Typed), CellValue::DateTime(expected));
    }

    #[test]
    fn test_any_value_cells() {
        assert_eq!(from_any_value(AnyValue::Null, CellMode::Typed), CellValue::Empty);
        assert_eq!(
            from_any_value(AnyValue::Int64(50), CellMode::Typed),
            CellValue::Number(50.0)
        );
        assert_eq!(
            from_any_value(AnyValue::String("WROCLAW"), CellMode::Typed),
            CellValue::text("WROCLAW")
        );
        assert_eq!(
            from_any_value(AnyValue::Float64(0.5), CellMode::TextOnly),
            CellValue::text("0.5")
        );
    }

    #[test]
    fn test_time_of_day() {
        assert_eq!(time_of_day(0.75), NaiveTime::from_hms_opt(18, 0, 0));
        assert_eq!(time_of_day(f64::NAN), None);
    }
}
