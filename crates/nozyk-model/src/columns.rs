//! Well-known column names of the delivery exports.

/// Driver identifier column.
pub const DRIVER_ID: &str = "Driver ID:";
/// Delivery exception / status column.
pub const EXCEPTION_INFO: &str = "Exception info";
/// Address columns used to identify a unique stop.
pub const POSTAL: &str = "Postal";
pub const CITY_NAME: &str = "City Name";
pub const STREET_NAME: &str = "Street Name";
pub const STREET_NUM: &str = "Street Num";
/// Raw coordinate pair.
pub const GPS_X: &str = "GPSX";
pub const GPS_Y: &str = "GPSY";

/// City counted as "home" in address summaries.
pub const HOME_CITY: &str = "WROCLAW";

/// Exception values offered for category filtering.
pub const KNOWN_EXCEPTIONS: [&str; 3] = ["DR RELEASED", "COMM INS REL", "SIG OBTAINED"];

/// Returns the first column that holds delivery dates.
///
/// A date column is named `DATA` (any case) or contains `date` (any case).
pub fn find_date_column<S: AsRef<str>>(columns: &[S]) -> Option<&str> {
    columns
        .iter()
        .map(AsRef::as_ref)
        .find(|name| is_date_column_name(name))
}

fn is_date_column_name(name: &str) -> bool {
    name.to_uppercase() == "DATA" || name.to_lowercase().contains("date")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_first_date_column() {
        assert_eq!(find_date_column(&["Driver ID:", "Data", "Date"]), Some("Data"));
        assert_eq!(find_date_column(&["Delivery Date"]), Some("Delivery Date"));
        assert_eq!(find_date_column(&["DATA_X", "City Name"]), None);
        assert_eq!(find_date_column::<&str>(&[]), None);
    }
}
