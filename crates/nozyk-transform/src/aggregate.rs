//! Per-driver summaries and overviews.
//!
//! Addresses are deduplicated before counting so that several status rows
//! for one stop count as a single visited address.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use nozyk_model::columns::{CITY_NAME, HOME_CITY, POSTAL, STREET_NAME, STREET_NUM};
use nozyk_model::{Dataset, SummaryRow};

use crate::dedupe::unique_rows_by_keys;
use crate::shorten::shorten_identifier;

/// Fewest address columns needed to deduplicate on the full address.
const MIN_ADDRESS_COLUMNS: usize = 2;

/// Names of the address columns and the city counted as home.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressColumns {
    pub postal: String,
    pub city: String,
    pub street_name: String,
    pub street_number: String,
    pub home_city: String,
}

impl Default for AddressColumns {
    fn default() -> Self {
        Self {
            postal: POSTAL.to_string(),
            city: CITY_NAME.to_string(),
            street_name: STREET_NAME.to_string(),
            street_number: STREET_NUM.to_string(),
            home_city: HOME_CITY.to_string(),
        }
    }
}

impl AddressColumns {
    fn names(&self) -> [&str; 4] {
        [
            self.postal.as_str(),
            self.city.as_str(),
            self.street_name.as_str(),
            self.street_number.as_str(),
        ]
    }
}

/// Unique addresses split by city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AddressCounts {
    pub unique: usize,
    pub home_city: usize,
    pub other: usize,
}

/// Totals of the status column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExceptionOverview {
    /// Rows with a non-empty status.
    pub total: usize,
    /// Most frequent status and its count; ties go to the first seen.
    pub most_common: Option<(String, usize)>,
}

/// Column positions resolved once per call.
struct AddressKeys {
    city: usize,
    keys: Vec<usize>,
}

impl AddressKeys {
    fn resolve(dataset: &Dataset, columns: &AddressColumns, date_column: Option<&str>) -> Option<Self> {
        let city = dataset.column_index(&columns.city)?;
        let available: Vec<usize> = columns
            .names()
            .iter()
            .filter_map(|name| dataset.column_index(name))
            .collect();
        let keys = if available.len() >= MIN_ADDRESS_COLUMNS {
            let mut keys = available;
            if let Some(date) = date_column.and_then(|name| dataset.column_index(name)) {
                keys.push(date);
            }
            keys
        } else {
            vec![city]
        };
        Some(Self { city, keys })
    }

    fn count<I>(&self, dataset: &Dataset, rows: I, home_city: &str) -> AddressCounts
    where
        I: IntoIterator<Item = usize>,
    {
        let unique = unique_rows_by_keys(dataset, &self.keys, rows);
        let home = unique
            .iter()
            .filter(|&&idx| {
                dataset.rows()[idx]
                    .get(self.city)
                    .is_some_and(|cell| cell.to_text().trim().eq_ignore_ascii_case(home_city))
            })
            .count();
        AddressCounts {
            unique: unique.len(),
            home_city: home,
            other: unique.len() - home,
        }
    }
}

/// Home-city and other-city address counts over the whole dataset.
///
/// `None` when the city column is absent.
pub fn address_counts(
    dataset: &Dataset,
    columns: &AddressColumns,
    date_column: Option<&str>,
) -> Option<AddressCounts> {
    let keys = AddressKeys::resolve(dataset, columns, date_column)?;
    Some(keys.count(dataset, 0..dataset.row_count(), &columns.home_city))
}

/// Counts non-empty status values.
pub fn exception_overview(dataset: &Dataset, status_column: &str) -> ExceptionOverview {
    let Some(index) = dataset.column_index(status_column) else {
        return ExceptionOverview::default();
    };
    let mut order: Vec<String> = Vec::new();
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for cell in dataset.column_values(index).filter(|cell| !cell.is_empty()) {
        let value = cell.to_text();
        let count = counts.entry(value.clone()).or_insert(0);
        if *count == 0 {
            order.push(value);
        }
        *count += 1;
    }
    let total = counts.values().sum();
    let mut most_common: Option<(String, usize)> = None;
    for value in order {
        let count = counts.get(&value).copied().unwrap_or(0);
        if most_common.as_ref().is_none_or(|(_, best)| count > *best) {
            most_common = Some((value, count));
        }
    }
    ExceptionOverview { total, most_common }
}

/// One [`SummaryRow`] per distinct identifier, sorted by display key.
///
/// Rows with an empty identifier are ignored. Address counts are zero when
/// the city column is absent; exception counts are zero when the status
/// column is absent.
pub fn summarize(
    dataset: &Dataset,
    identifier_column: &str,
    status_column: &str,
    address: &AddressColumns,
    date_column: Option<&str>,
) -> Vec<SummaryRow> {
    let Some(identifier_index) = dataset.column_index(identifier_column) else {
        info!(column = identifier_column, "identifier column not found, no summary");
        return Vec::new();
    };
    let status_index = dataset.column_index(status_column);
    let address_keys = AddressKeys::resolve(dataset, address, date_column);

    let mut order: Vec<String> = Vec::new();
    let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (idx, row) in dataset.rows().iter().enumerate() {
        let Some(cell) = row.get(identifier_index).filter(|cell| !cell.is_empty()) else {
            continue;
        };
        let identifier = cell.to_text();
        let members = groups.entry(identifier.clone()).or_default();
        if members.is_empty() {
            order.push(identifier);
        }
        members.push(idx);
    }

    let mut summary: Vec<SummaryRow> = order
        .into_iter()
        .map(|identifier| {
            let members = groups.remove(&identifier).unwrap_or_default();
            let exception_count = status_index.map_or(0, |status| {
                members
                    .iter()
                    .filter(|&&idx| {
                        dataset.rows()[idx]
                            .get(status)
                            .is_some_and(|cell| !cell.is_empty())
                    })
                    .count()
            });
            let counts = address_keys.as_ref().map_or_else(AddressCounts::default, |keys| {
                keys.count(dataset, members.iter().copied(), &address.home_city)
            });
            SummaryRow {
                short_identifier: shorten_identifier(&identifier),
                identifier,
                exception_count,
                home_city_count: counts.home_city,
                other_city_count: counts.other,
                total_rows: members.len(),
            }
        })
        .collect();
    summary.sort_by(|a, b| a.short_identifier.cmp(&b.short_identifier));
    debug!(groups = summary.len(), "summarized identifiers");
    summary
}

#[cfg(test)]
mod tests {
    use nozyk_model::CellValue;

    use super::*;

    #[test]
    fn overview_counts_non_empty_status() {
        let dataset = Dataset::from_rows(
            ["Exception info"],
            vec![
                vec!["SIG OBTAINED".into()],
                vec![CellValue::Empty],
                vec!["DR RELEASED".into()],
                vec!["DR RELEASED".into()],
                vec!["SIG OBTAINED".into()],
            ],
        )
        .unwrap();
        let overview = exception_overview(&dataset, "Exception info");
        assert_eq!(overview.total, 4);
        assert_eq!(overview.most_common, Some(("SIG OBTAINED".to_string(), 2)));
        assert_eq!(exception_overview(&dataset, "Missing"), ExceptionOverview::default());
    }

    #[test]
    fn city_alone_when_address_is_sparse() {
        let dataset = Dataset::from_rows(
            ["City Name"],
            vec![
                vec!["WROCLAW".into()],
                vec!["wroclaw ".into()],
                vec!["OLAWA".into()],
                vec!["OLAWA".into()],
            ],
        )
        .unwrap();
        let counts = address_counts(&dataset, &AddressColumns::default(), None).unwrap();
        // "wroclaw " is a distinct key but still counts as the home city.
        assert_eq!(
            counts,
            AddressCounts {
                unique: 3,
                home_city: 2,
                other: 1
            }
        );
    }

    #[test]
    fn no_city_column_means_no_counts() {
        let dataset = Dataset::from_rows(["Postal", "Street Name"], vec![]).unwrap();
        assert_eq!(address_counts(&dataset, &AddressColumns::default(), None), None);
    }
}
