//! CLI argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use nozyk_cli::pipeline::ExceptionSelection;
use nozyk_cli::session::SelectionOverrides;
use nozyk_output::ExportFormat;
use nozyk_transform::DateOption;

#[derive(Parser)]
#[command(
    name = "nozyk",
    version,
    about = "Explore delivery spreadsheets: filter, summarize per driver, export",
    long_about = "Explore delivery spreadsheets exported from route planning.\n\n\
                  Reads XLSX/XLS/ODS workbooks and CSV files, normalizes mixed columns,\n\
                  filters by date, driver and exception status, summarizes per driver\n\
                  and exports the result as CSV or XLSX."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow driver identifiers in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// JSON configuration file (column names, region, normalization).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the sheets of a file with their sizes.
    Sheets(SheetsArgs),

    /// Show how each column was normalized and preview the first rows.
    Inspect(InspectArgs),

    /// Exception overview, address counts and the per-driver summary.
    Summary(SummaryArgs),

    /// Write the filtered rows as CSV or XLSX.
    Export(ExportArgs),

    /// Resolve GPS columns to latitude/longitude.
    Geo(GeoArgs),
}

#[derive(Args)]
pub struct SheetsArgs {
    /// Spreadsheet or CSV file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct InspectArgs {
    /// Spreadsheet or CSV file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Sheet to inspect (default: first sheet).
    #[arg(long = "sheet")]
    pub sheet: Option<String>,

    /// Number of rows to preview.
    #[arg(long = "rows", default_value_t = 10)]
    pub rows: usize,
}

/// Selection shared by the filtering commands.
#[derive(Args)]
pub struct FilterArgs {
    /// Spreadsheet or CSV file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Sheet to process (default: remembered sheet, else the first one).
    #[arg(long = "sheet")]
    pub sheet: Option<String>,

    /// Remember the selection in this JSON file between runs.
    #[arg(long = "session", value_name = "PATH")]
    pub session: Option<PathBuf>,

    /// Date selection.
    #[arg(long = "dates", value_enum)]
    pub dates: Option<DatesArg>,

    /// First day of a custom range (YYYY-MM-DD).
    #[arg(long = "from", value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Last day of a custom range (YYYY-MM-DD).
    #[arg(long = "to", value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Driver, by short or full identifier (default: all drivers).
    #[arg(long = "driver")]
    pub driver: Option<String>,

    /// Keep rows with this exception status (repeatable).
    #[arg(long = "exception", value_name = "STATUS", conflicts_with_all = ["no_exceptions", "any_exception"])]
    pub exceptions: Vec<String>,

    /// Select no exception status at all; no row passes.
    #[arg(long = "no-exceptions", conflicts_with = "any_exception")]
    pub no_exceptions: bool,

    /// Do not filter on exception status.
    #[arg(long = "any-exception")]
    pub any_exception: bool,
}

impl FilterArgs {
    /// Choices given on the command line.
    ///
    /// A custom date selection without bounds is left for
    /// [`FilterArgs::wants_full_range`] to resolve against the data.
    pub fn overrides(&self) -> SelectionOverrides {
        SelectionOverrides {
            sheet: self.sheet.clone(),
            dates: self.date_option(),
            driver: self.driver.clone(),
            exceptions: self.exception_selection(),
        }
    }

    /// True for `--dates custom` without `--from`/`--to`.
    pub fn wants_full_range(&self) -> bool {
        matches!(self.dates, Some(DatesArg::Custom)) && self.from.is_none() && self.to.is_none()
    }

    fn date_option(&self) -> Option<DateOption> {
        match (self.dates, self.from, self.to) {
            (Some(DatesArg::All), _, _) => Some(DateOption::AllDates),
            (Some(DatesArg::Saturdays), _, _) => Some(DateOption::Saturdays),
            (_, Some(from), Some(to)) => Some(DateOption::range(from, to)),
            (_, Some(day), None) | (_, None, Some(day)) => Some(DateOption::single_day(day)),
            (Some(DatesArg::Custom), None, None) | (None, None, None) => None,
        }
    }

    fn exception_selection(&self) -> Option<ExceptionSelection> {
        if self.any_exception {
            Some(ExceptionSelection::Any)
        } else if self.no_exceptions {
            Some(ExceptionSelection::Only(Vec::new()))
        } else if !self.exceptions.is_empty() {
            Some(ExceptionSelection::Only(self.exceptions.clone()))
        } else {
            None
        }
    }
}

#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Also export the summary table.
    #[arg(long = "export", value_enum)]
    pub export: Option<FormatArg>,

    /// Directory for exported files (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "xlsx")]
    pub format: FormatArg,

    /// Output file (default: filtered_data_<timestamp>.<ext> in the current directory).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct GeoArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Column holding the X coordinate (default from config: GPSX).
    #[arg(long = "x", value_name = "COLUMN")]
    pub x: Option<String>,

    /// Column holding the Y coordinate (default from config: GPSY).
    #[arg(long = "y", value_name = "COLUMN")]
    pub y: Option<String>,

    /// Write resolved points as CSV.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DatesArg {
    All,
    Saturdays,
    Custom,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Csv,
    Xlsx,
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Xlsx => ExportFormat::Xlsx,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    fn filter_args(cli: Cli) -> FilterArgs {
        match cli.command {
            Command::Summary(args) => args.filter,
            _ => panic!("expected summary"),
        }
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn custom_range_from_bounds() {
        let args = filter_args(parse(&[
            "nozyk", "summary", "routes.xlsx", "--dates", "custom", "--from", "2024-03-09", "--to",
            "2024-03-01",
        ]));
        let from = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(args.overrides().dates, Some(DateOption::range(from, to)));
        assert!(!args.wants_full_range());
    }

    #[test]
    fn custom_without_bounds_needs_the_data() {
        let args = filter_args(parse(&["nozyk", "summary", "routes.xlsx", "--dates", "custom"]));
        assert_eq!(args.overrides().dates, None);
        assert!(args.wants_full_range());
    }

    #[test]
    fn exception_flags() {
        let args = filter_args(parse(&[
            "nozyk", "summary", "r.csv", "--exception", "DR RELEASED", "--exception", "SIG OBTAINED",
        ]));
        assert_eq!(
            args.overrides().exceptions,
            Some(ExceptionSelection::Only(vec![
                "DR RELEASED".to_string(),
                "SIG OBTAINED".to_string()
            ]))
        );
        let args = filter_args(parse(&["nozyk", "summary", "r.csv", "--no-exceptions"]));
        assert_eq!(
            args.overrides().exceptions,
            Some(ExceptionSelection::Only(Vec::new()))
        );
        let args = filter_args(parse(&["nozyk", "summary", "r.csv"]));
        assert_eq!(args.overrides().exceptions, None);
        assert!(
            Cli::try_parse_from(["nozyk", "summary", "r.csv", "--no-exceptions", "--any-exception"])
                .is_err()
        );
    }
}
