//! The processing pass behind every command:
//! load → normalize → filter → aggregate, plus coordinate resolution and
//! export on demand.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn};

use nozyk_geo::{GeoResolution, resolve_coordinates_with};
use nozyk_ingest::load_workbook;
use nozyk_model::{Dataset, SummaryRow, find_date_column};
use nozyk_normalization::{NormalizationReport, normalize_with};
use nozyk_output::{ExportFormat, export_file_name, write_bytes};
use nozyk_transform::{
    AddressCounts, DateOption, ExceptionOverview, FilterSpec, IdentifierSelection, address_counts,
    available_categories, exception_overview, filter, identifier_options, resolve_identifier,
    summarize,
};

use crate::config::AppConfig;
use crate::logging::redact_value;

/// Which status values to keep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum ExceptionSelection {
    /// Every known exception value present in the date- and
    /// driver-filtered rows; no filter when none is present.
    #[default]
    Default,
    /// Exactly these values. An empty list keeps no rows.
    Only(Vec<String>),
    /// No status filter.
    Any,
}

/// The user's current choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    pub sheet: Option<String>,
    pub dates: DateOption,
    /// Short or full driver identifier; `None` selects every driver.
    pub driver: Option<String>,
    pub exceptions: ExceptionSelection,
}

/// One normalized sheet.
#[derive(Debug, Clone)]
pub struct LoadedSheet {
    pub source: PathBuf,
    pub sheet: String,
    pub dataset: Dataset,
    pub report: NormalizationReport,
    pub date_column: Option<String>,
}

/// Loads `sheet` (the first sheet when `None`) and normalizes it.
pub fn load_sheet(path: &Path, sheet: Option<&str>, config: &AppConfig) -> Result<LoadedSheet> {
    let workbook = {
        let _span = info_span!("ingest").entered();
        load_workbook(path).with_context(|| format!("load {}", path.display()))?
    };
    let available = workbook.sheet_names().join(", ");
    let selected = workbook
        .into_sheet(sheet)
        .ok_or_else(|| anyhow!("sheet '{}' not found; available: {available}", sheet.unwrap_or("")))?;

    let _span = info_span!("normalize", sheet = %selected.name).entered();
    let (dataset, report) = normalize_with(selected.dataset, &config.normalization);
    if report.fallback_count() > 0 {
        warn!(columns = report.fallback_count(), "columns fell back to text");
    }
    let date_column = find_date_column(dataset.columns()).map(str::to_string);
    info!(
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        date_column = date_column.as_deref().unwrap_or("-"),
        "sheet ready"
    );
    Ok(LoadedSheet {
        source: path.to_path_buf(),
        sheet: selected.name,
        dataset,
        report,
        date_column,
    })
}

/// Builds the filter for the current selection.
///
/// Driver choices come from the date-filtered rows and the default status
/// set from the rows left after the date and driver predicates.
pub fn build_filter(loaded: &LoadedSheet, selection: &Selection, config: &AppConfig) -> FilterSpec {
    let dataset = &loaded.dataset;
    let columns = &config.columns;
    let mut spec = FilterSpec::new();

    match &loaded.date_column {
        Some(column) => spec = spec.with_date(column.clone(), selection.dates),
        None if selection.dates != DateOption::AllDates => {
            warn!("no date column found, date selection ignored");
        }
        None => {}
    }

    let dated = filter(dataset, &spec);
    let options = identifier_options(&dated, &columns.driver);
    let identifier = resolve_identifier(&options, selection.driver.as_deref());
    if let IdentifierSelection::Only(full) = &identifier {
        info!(driver = redact_value(full), "driver selected");
    }
    spec = spec.with_identifier(columns.driver.clone(), identifier);

    match &selection.exceptions {
        ExceptionSelection::Default => {
            let scoped = filter(dataset, &spec);
            let available = available_categories(&scoped, &columns.status, &columns.known_exceptions);
            if available.is_empty() {
                info!("no known exception values in the selection, status filter off");
            } else {
                spec = spec.with_category(columns.status.clone(), available);
            }
        }
        ExceptionSelection::Only(values) => {
            spec = spec.with_category(columns.status.clone(), values.iter().cloned());
        }
        ExceptionSelection::Any => {}
    }
    spec
}

/// Filtered rows and everything derived from them.
#[derive(Debug, Clone)]
pub struct Exploration {
    pub spec: FilterSpec,
    pub filtered: Dataset,
    pub overview: ExceptionOverview,
    pub addresses: Option<AddressCounts>,
    pub summary: Vec<SummaryRow>,
}

impl Exploration {
    /// The single selected driver, if any.
    pub fn selected_driver(&self) -> Option<&str> {
        match self.spec.identifier.as_ref().map(|predicate| &predicate.selection) {
            Some(IdentifierSelection::Only(full)) => Some(full),
            _ => None,
        }
    }
}

/// Filters the sheet and aggregates the result.
pub fn explore(loaded: &LoadedSheet, selection: &Selection, config: &AppConfig) -> Exploration {
    let spec = build_filter(loaded, selection, config);
    let filtered = {
        let _span = info_span!("filter").entered();
        filter(&loaded.dataset, &spec)
    };
    if filtered.is_empty() {
        info!("no rows match the selection");
    }

    let _span = info_span!("aggregate").entered();
    let date_column = loaded.date_column.as_deref();
    let overview = exception_overview(&filtered, &config.columns.status);
    let addresses = address_counts(&filtered, &config.address, date_column);
    let summary = summarize(
        &filtered,
        &config.columns.driver,
        &config.columns.status,
        &config.address,
        date_column,
    );
    info!(
        rows = filtered.row_count(),
        drivers = summary.len(),
        exceptions = overview.total,
        "aggregated"
    );
    Exploration {
        spec,
        filtered,
        overview,
        addresses,
        summary,
    }
}

/// Resolves coordinates of `dataset` with the configured region.
pub fn resolve_geo(dataset: &Dataset, x: &str, y: &str, config: &AppConfig) -> GeoResolution {
    let _span = info_span!("geo", x, y).entered();
    let resolution = resolve_coordinates_with(dataset, x, y, &config.region);
    if let GeoResolution::Resolved(resolved) = &resolution {
        for advisory in &resolved.advisories {
            warn!(%advisory, "coordinate advisory");
        }
    }
    resolution
}

/// `dir/stem_YYYYMMDD_HHMMSS.ext`
pub fn timestamped_path(dir: &Path, stem: &str, format: ExportFormat, now: NaiveDateTime) -> PathBuf {
    dir.join(export_file_name(stem, format, now))
}

/// Writes `dataset` to `path` in `format`.
pub fn export_dataset(
    dataset: &Dataset,
    format: ExportFormat,
    sheet_name: &str,
    path: &Path,
) -> Result<()> {
    let _span = info_span!("export", format = %format, path = %path.display()).entered();
    let bytes = format
        .render(dataset, sheet_name)
        .with_context(|| format!("render {format}"))?;
    write_bytes(path, &bytes).with_context(|| format!("write {}", path.display()))?;
    info!(rows = dataset.row_count(), bytes = bytes.len(), "exported");
    Ok(())
}
