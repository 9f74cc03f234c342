//! Workbook loading: every sheet of a spreadsheet, or one sheet for CSV.

use std::path::{Path, PathBuf};

use calamine::{Data, Reader, open_workbook_auto};
use tracing::{debug, error, info, info_span, warn};

use nozyk_model::{CellValue, Dataset};

use crate::cells::{CellMode, from_calamine, header_text};
use crate::csv::read_csv_sheet;
use crate::error::{IngestError, Result};
use crate::headers::normalize_headers;

/// Container format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// `.xlsx`, `.xlsm`, `.xls`, `.xlsb`, `.ods`
    Spreadsheet,
    Csv,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(SourceFormat::Spreadsheet),
            "csv" => Ok(SourceFormat::Csv),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// One named sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub dataset: Dataset,
}

/// Every readable sheet of a file, in workbook order.
#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    pub path: PathBuf,
    pub format: SourceFormat,
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|sheet| sheet.name.as_str()).collect()
    }

    pub fn first_sheet(&self) -> Option<&Sheet> {
        self.sheets.first()
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    /// Takes ownership of one sheet, or the first one when `name` is `None`.
    pub fn into_sheet(self, name: Option<&str>) -> Option<Sheet> {
        match name {
            Some(name) => self.sheets.into_iter().find(|sheet| sheet.name == name),
            None => self.sheets.into_iter().next(),
        }
    }
}

/// Loads every sheet of `path`.
///
/// A sheet that fails is retried with every cell read as text and skipped
/// if it fails again. Fails when no sheet could be read.
pub fn load_workbook(path: &Path) -> Result<Workbook> {
    let _span = info_span!("load_workbook", path = %path.display()).entered();
    let format = SourceFormat::from_path(path)?;
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let sheets = match format {
        SourceFormat::Spreadsheet => read_spreadsheet(path)?,
        SourceFormat::Csv => {
            let name = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("Sheet1")
                .to_string();
            with_text_fallback(&name, |mode| read_csv_sheet(path, mode))
                .map(|dataset| Sheet { name, dataset })
                .into_iter()
                .collect()
        }
    };
    if sheets.is_empty() {
        return Err(IngestError::NoSheets {
            path: path.to_path_buf(),
        });
    }
    info!(sheets = sheets.len(), "loaded workbook");
    Ok(Workbook {
        path: path.to_path_buf(),
        format,
        sheets,
    })
}

fn read_spreadsheet(path: &Path) -> Result<Vec<Sheet>> {
    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let names = workbook.sheet_names().to_vec();
    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = match workbook.worksheet_range(&name) {
            Ok(range) => range,
            Err(e) => {
                error!(sheet = %name, error = %e, "sheet could not be opened, skipping");
                continue;
            }
        };
        let rows: Vec<&[Data]> = range.rows().collect();
        if let Some(dataset) = with_text_fallback(&name, |mode| sheet_dataset(&name, &rows, mode)) {
            sheets.push(Sheet { name, dataset });
        }
    }
    Ok(sheets)
}

/// Runs `read` in typed mode, then in text-only mode.
fn with_text_fallback<F>(sheet: &str, read: F) -> Option<Dataset>
where
    F: Fn(CellMode) -> Result<Dataset>,
{
    match read(CellMode::Typed) {
        Ok(dataset) => Some(dataset),
        Err(first) => {
            warn!(sheet, error = %first, "sheet read failed, retrying as text");
            match read(CellMode::TextOnly) {
                Ok(dataset) => Some(dataset),
                Err(second) => {
                    error!(sheet, error = %second, "sheet unreadable, skipping");
                    None
                }
            }
        }
    }
}

/// Builds a dataset from raw sheet rows; the first non-empty row is the header.
pub(crate) fn sheet_dataset(sheet: &str, rows: &[&[Data]], mode: CellMode) -> Result<Dataset> {
    let mut rows = rows
        .iter()
        .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)));
    let Some(header) = rows.next() else {
        return Err(IngestError::Sheet {
            sheet: sheet.to_string(),
            message: "sheet is empty".to_string(),
        });
    };
    let columns = normalize_headers(header.iter().map(header_text));
    let width = columns.len();
    let mut dataset = Dataset::new(columns)?;
    for row in rows {
        let mut cells: Vec<CellValue> = row
            .iter()
            .take(width)
            .map(|cell| from_calamine(cell, mode))
            .collect();
        if cells.iter().all(CellValue::is_empty) {
            continue;
        }
        cells.resize(width, CellValue::Empty);
        dataset.push_row(cells)?;
    }
    debug!(
        sheet,
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        "read sheet"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_format_from_extension() {
        assert_eq!(
            SourceFormat::from_path(Path::new("routes.XLSX")).unwrap(),
            SourceFormat::Spreadsheet
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("routes.csv")).unwrap(),
            SourceFormat::Csv
        );
        assert!(matches!(
            SourceFormat::from_path(Path::new("routes.txt")),
            Err(IngestError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            SourceFormat::from_path(Path::new("routes")),
            Err(IngestError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_sheet_dataset_skips_blank_rows_and_pads() {
        let blank = vec![Data::Empty, Data::Empty];
        let header = vec![Data::String("Driver ID:".into()), Data::String("City Name".into())];
        let short = vec![Data::String("PL001KOW12".into())];
        let full = vec![Data::String("PL001ABC34".into()), Data::String("OLAWA".into())];
        let rows: Vec<&[Data]> = vec![
            blank.as_slice(),
            header.as_slice(),
            short.as_slice(),
            blank.as_slice(),
            full.as_slice(),
        ];
        let dataset = sheet_dataset("Arkusz1", &rows, CellMode::Typed).unwrap();
        assert_eq!(dataset.columns(), ["Driver ID:", "City Name"]);
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.value(0, "City Name"), Some(&CellValue::Empty));
        assert_eq!(dataset.value(1, "City Name"), Some(&CellValue::text("OLAWA")));
    }

    #[test]
    fn test_sheet_dataset_rejects_empty_sheet() {
        let rows: Vec<&[Data]> = Vec::new();
        assert!(matches!(
            sheet_dataset("Empty", &rows, CellMode::Typed),
            Err(IngestError::Sheet { .. })
        ));
    }
}
