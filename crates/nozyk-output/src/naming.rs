use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use nozyk_model::Dataset;

use crate::csv::to_csv_string;
use crate::error::{OutputError, Result};
use crate::xlsx::to_xlsx_bytes;

/// Timestamp embedded in export file names.
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// Serializes `dataset` in this format.
    pub fn render(self, dataset: &Dataset, sheet_name: &str) -> Result<Vec<u8>> {
        let bytes = match self {
            ExportFormat::Csv => to_csv_string(dataset)?.into_bytes(),
            ExportFormat::Xlsx => to_xlsx_bytes(dataset, sheet_name)?,
        };
        debug!(format = %self, bytes = bytes.len(), "rendered export");
        Ok(bytes)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = OutputError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            _ => Err(OutputError::UnknownFormat(value.to_string())),
        }
    }
}

/// `stem_YYYYMMDD_HHMMSS.ext`
pub fn export_file_name(stem: &str, format: ExportFormat, timestamp: NaiveDateTime) -> String {
    format!(
        "{stem}_{}.{}",
        timestamp.format(TIMESTAMP_FORMAT),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn file_name_embeds_timestamp() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 2)
            .unwrap()
            .and_hms_opt(7, 5, 9)
            .unwrap();
        assert_eq!(
            export_file_name("filtered_data", ExportFormat::Xlsx, at),
            "filtered_data_20240302_070509.xlsx"
        );
    }

    #[test]
    fn parses_format_names() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("excel".parse::<ExportFormat>().unwrap(), ExportFormat::Xlsx);
        assert!("pdf".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Csv.mime_type(), "text/csv");
    }
}
