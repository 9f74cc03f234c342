use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use nozyk_model::{CellValue, Dataset};

use crate::common::ensure_parent_dir;
use crate::error::{OutputError, Result};

/// Writes the header row and every data row.
pub fn write_csv<W: Write>(dataset: &Dataset, writer: W) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(dataset.columns())?;
    for row in dataset.rows() {
        out.write_record(row.cells.iter().map(CellValue::to_text))?;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn to_csv_string(dataset: &Dataset) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(dataset, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

pub fn write_csv_file(dataset: &Dataset, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(dataset, file)?;
    debug!(path = %path.display(), rows = dataset.row_count(), "wrote csv");
    Ok(())
}
