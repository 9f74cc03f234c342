//! Spreadsheet serial date/time conversion.
//!
//! A serial value counts days (with a fractional time part) from an epoch.
//! Pure dates are anchored at the epoch after subtracting a fixed offset;
//! times of day keep only the time component of the anchored value.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Largest accepted magnitude of a serial value (days).
const MAX_SERIAL_DAYS: f64 = 3_000_000.0;

/// Anchors `days` at `epoch` midnight.
///
/// Returns `None` for non-finite or out-of-range values.
pub fn anchor_serial(epoch: NaiveDate, days: f64) -> Option<NaiveDateTime> {
    if !days.is_finite() || days.abs() > MAX_SERIAL_DAYS {
        return None;
    }
    let millis = (days * MILLIS_PER_DAY).round() as i64;
    epoch
        .and_time(NaiveTime::MIN)
        .checked_add_signed(Duration::milliseconds(millis))
}

/// Converts a pure-date serial: `epoch + (serial - offset_days)`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use nozyk_normalization::serial::serial_to_datetime;
///
/// let epoch = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
/// let converted = serial_to_datetime(44.0, epoch, 2).unwrap();
/// assert_eq!(converted.date(), NaiveDate::from_ymd_opt(1900, 2, 12).unwrap());
/// ```
pub fn serial_to_datetime(serial: f64, epoch: NaiveDate, offset_days: i64) -> Option<NaiveDateTime> {
    anchor_serial(epoch, serial - offset_days as f64)
}

/// Converts a time-of-day serial, keeping only the time component.
pub fn serial_to_time(serial: f64, epoch: NaiveDate) -> Option<NaiveTime> {
    anchor_serial(epoch, serial).map(|value| value.time())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn epoch() -> NaiveDate {
        NaiveDate::from_ymd_opt(1900, 1, 1).unwrap()
    }

    #[test]
    fn serial_two_is_the_epoch() {
        let converted = serial_to_datetime(2.0, epoch(), 2).unwrap();
        assert_eq!(converted, epoch().and_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn modern_serial_matches_spreadsheet_calendar() {
        // 45353 is 2024-03-02 in the 1900 date system.
        let converted = serial_to_datetime(45353.0, epoch(), 2).unwrap();
        assert_eq!(converted.date(), NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
    }

    #[test]
    fn fractional_date_serial_keeps_time() {
        let converted = serial_to_datetime(45353.5, epoch(), 2).unwrap();
        assert_eq!(converted.time(), NaiveTime::from_hms_opt(12, 0, 0).unwrap());
    }

    #[test]
    fn time_serial_takes_time_of_day() {
        assert_eq!(
            serial_to_time(0.75, epoch()),
            NaiveTime::from_hms_opt(18, 0, 0)
        );
        assert_eq!(
            serial_to_time(45353.25, epoch()),
            NaiveTime::from_hms_opt(6, 0, 0)
        );
    }

    #[test]
    fn rejects_non_finite_and_huge_values() {
        assert_eq!(serial_to_datetime(f64::NAN, epoch(), 2), None);
        assert_eq!(serial_to_datetime(f64::INFINITY, epoch(), 2), None);
        assert_eq!(serial_to_datetime(1e12, epoch(), 2), None);
    }
}
