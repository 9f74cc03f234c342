//! Choices offered to the user before filtering.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::info;

use nozyk_model::Dataset;

use crate::filter::IdentifierSelection;
use crate::shorten::shorten_identifier;

/// Short display key → full identifier, ordered by display key.
///
/// When two identifiers share a display key the later one wins.
pub fn identifier_options(dataset: &Dataset, column: &str) -> BTreeMap<String, String> {
    let mut options = BTreeMap::new();
    let Some(index) = dataset.column_index(column) else {
        return options;
    };
    for cell in dataset.column_values(index) {
        if cell.is_empty() {
            continue;
        }
        let full = cell.to_text();
        options.insert(shorten_identifier(&full), full);
    }
    options
}

/// Resolves a user choice, given as a short or full identifier.
///
/// `None` and unknown choices select every identifier.
pub fn resolve_identifier(
    options: &BTreeMap<String, String>,
    choice: Option<&str>,
) -> IdentifierSelection {
    let Some(choice) = choice.map(str::trim).filter(|choice| !choice.is_empty()) else {
        return IdentifierSelection::All;
    };
    if let Some(full) = options.get(choice) {
        return IdentifierSelection::Only(full.clone());
    }
    if options.values().any(|full| full == choice) {
        return IdentifierSelection::Only(choice.to_string());
    }
    info!("identifier choice not present in data, showing all");
    IdentifierSelection::All
}

/// Candidates that occur in `column`, in candidate order.
pub fn available_categories<S: AsRef<str>>(
    dataset: &Dataset,
    column: &str,
    candidates: &[S],
) -> Vec<String> {
    let Some(index) = dataset.column_index(column) else {
        return Vec::new();
    };
    candidates
        .iter()
        .map(AsRef::as_ref)
        .filter(|candidate| {
            dataset
                .column_values(index)
                .any(|cell| !cell.is_empty() && cell.to_text() == *candidate)
        })
        .map(str::to_string)
        .collect()
}

/// Earliest and latest date in `column`.
pub fn date_bounds(dataset: &Dataset, column: &str) -> Option<(NaiveDate, NaiveDate)> {
    let index = dataset.column_index(column)?;
    dataset
        .column_values(index)
        .filter_map(|cell| cell.date())
        .fold(None, |bounds, date| match bounds {
            None => Some((date, date)),
            Some((low, high)) => Some((low.min(date), high.max(date))),
        })
}
