use serde::{Deserialize, Serialize};

/// Per-identifier aggregate over a filtered dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Full identifier as found in the data.
    pub identifier: String,
    /// Display key derived from the identifier.
    pub short_identifier: String,
    /// Rows whose status field is non-empty.
    pub exception_count: usize,
    /// Unique addresses located in the home city.
    pub home_city_count: usize,
    /// Unique addresses located elsewhere.
    pub other_city_count: usize,
    /// Rows for this identifier.
    pub total_rows: usize,
}

impl SummaryRow {
    /// Label shown in tables: `SHORT (FULL)`.
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.short_identifier, self.identifier)
    }
}
