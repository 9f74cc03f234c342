use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, info_span, warn};

use nozyk_cli::config::AppConfig;
use nozyk_cli::pipeline::{
    LoadedSheet, Selection, explore, export_dataset, load_sheet, resolve_geo, timestamped_path,
};
use nozyk_cli::session::SessionState;
use nozyk_geo::GeoResolution;
use nozyk_ingest::load_workbook;
use nozyk_output::{ExportFormat, summary_dataset, write_csv_file};
use nozyk_transform::{DateOption, date_bounds, shorten_identifier};

use crate::cli::{ExportArgs, FilterArgs, GeoArgs, InspectArgs, SheetsArgs, SummaryArgs};
use crate::summary::{
    print_geo, print_overview, print_preview, print_report, print_sheets, print_summary,
};

const FILTERED_STEM: &str = "filtered_data";
const SUMMARY_STEM: &str = "summary";
const PREVIEW_ROWS: usize = 10;
const GEO_PREVIEW_POINTS: usize = 10;

pub fn run_sheets(args: &SheetsArgs) -> Result<()> {
    let workbook = with_spinner("Reading workbook", || load_workbook(&args.file))
        .with_context(|| format!("load {}", args.file.display()))?;
    print_sheets(&workbook);
    Ok(())
}

pub fn run_inspect(args: &InspectArgs, config: &AppConfig) -> Result<()> {
    let loaded = with_spinner("Reading sheet", || {
        load_sheet(&args.file, args.sheet.as_deref(), config)
    })?;
    print_report(&loaded);
    println!();
    print_preview(&loaded.dataset, args.rows);
    Ok(())
}

pub fn run_summary(args: &SummaryArgs, config: &AppConfig) -> Result<()> {
    let (loaded, selection) = open_selection(&args.filter, config)?;
    let exploration = explore(&loaded, &selection, config);
    let home_city = &config.address.home_city;

    print_overview(&exploration, home_city);
    println!();
    match exploration.selected_driver() {
        Some(driver) => {
            println!("Driver: {} ({driver})", shorten_identifier(driver));
            print_preview(&exploration.filtered, PREVIEW_ROWS);
        }
        None => print_summary(&exploration.summary, home_city),
    }

    if let Some(format) = args.export {
        let format = ExportFormat::from(format);
        let dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let now = Local::now().naive_local();
        let table = summary_dataset(&exploration.summary, home_city)?;
        let path = timestamped_path(&dir, SUMMARY_STEM, format, now);
        export_dataset(&table, format, SUMMARY_STEM, &path)?;
        println!("Summary written to {}", path.display());
    }
    Ok(())
}

pub fn run_export(args: &ExportArgs, config: &AppConfig) -> Result<()> {
    let (loaded, selection) = open_selection(&args.filter, config)?;
    let exploration = explore(&loaded, &selection, config);
    let format = ExportFormat::from(args.format);
    let path = match &args.output {
        Some(path) => path.clone(),
        None => timestamped_path(
            Path::new("."),
            FILTERED_STEM,
            format,
            Local::now().naive_local(),
        ),
    };
    with_spinner("Writing export", || {
        export_dataset(&exploration.filtered, format, &loaded.sheet, &path)
    })?;
    println!(
        "{} rows written to {}",
        exploration.filtered.row_count(),
        path.display()
    );
    Ok(())
}

pub fn run_geo(args: &GeoArgs, config: &AppConfig) -> Result<()> {
    let (loaded, selection) = open_selection(&args.filter, config)?;
    let exploration = explore(&loaded, &selection, config);
    let x = args.x.as_deref().unwrap_or(&config.columns.gps_x);
    let y = args.y.as_deref().unwrap_or(&config.columns.gps_y);

    let resolved = match resolve_geo(&exploration.filtered, x, y, config) {
        GeoResolution::Resolved(resolved) => resolved,
        GeoResolution::NoGeoData => {
            println!("No usable coordinates in columns {x}/{y}.");
            return Ok(());
        }
    };
    print_geo(&resolved, GEO_PREVIEW_POINTS);
    if let Some(path) = &args.output {
        let points = resolved.to_dataset()?;
        write_csv_file(&points, path).with_context(|| format!("write {}", path.display()))?;
        println!("Points written to {}", path.display());
    }
    Ok(())
}

/// Loads the sheet for `args`, merging the remembered session and saving
/// the updated selection afterwards.
fn open_selection(args: &FilterArgs, config: &AppConfig) -> Result<(LoadedSheet, Selection)> {
    let session = match &args.session {
        Some(path) => SessionState::load(path)?,
        None => SessionState::default(),
    };
    let mut overrides = args.overrides();
    let loaded = with_spinner("Reading sheet", || {
        load_requested_sheet(&args.file, args.sheet.as_deref(), &session, config)
    })?;

    if args.wants_full_range() {
        let bounds = loaded
            .date_column
            .as_deref()
            .and_then(|column| date_bounds(&loaded.dataset, column));
        overrides.dates = Some(match bounds {
            Some((first, last)) => DateOption::range(first, last),
            None => {
                warn!("no dates in the sheet, custom range selects all dates");
                DateOption::AllDates
            }
        });
    }
    let mut selection = session.merge(&overrides);
    selection.sheet = Some(loaded.sheet.clone());

    if let Some(path) = &args.session {
        let _span = info_span!("session", path = %path.display()).entered();
        SessionState {
            selection: selection.clone(),
        }
        .save(path)?;
        info!("selection saved");
    }
    Ok((loaded, selection))
}

/// An explicit sheet must exist; a remembered one falls back to the first
/// sheet when the file no longer has it.
fn load_requested_sheet(
    file: &Path,
    explicit: Option<&str>,
    session: &SessionState,
    config: &AppConfig,
) -> Result<LoadedSheet> {
    if explicit.is_some() {
        return load_sheet(file, explicit, config);
    }
    let remembered = session.selection.sheet.as_deref();
    match load_sheet(file, remembered, config) {
        Ok(loaded) => Ok(loaded),
        Err(error) if remembered.is_some() => {
            warn!(%error, "remembered sheet unavailable, using the first sheet");
            load_sheet(file, None, config)
        }
        Err(error) => Err(error),
    }
}

/// Shows a spinner on an interactive terminal while `work` runs.
fn with_spinner<T>(message: &'static str, work: impl FnOnce() -> T) -> T {
    if !io::stderr().is_terminal() {
        return work();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = work();
    spinner.finish_and_clear();
    result
}
