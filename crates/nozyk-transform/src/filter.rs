//! Declarative row filtering.
//!
//! A [`FilterSpec`] is built fresh from the caller's current selections and
//! applied as a pure function; predicates combine by conjunction.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use nozyk_model::{CellValue, Dataset, Row};

/// Which dates pass the date predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DateOption {
    #[default]
    AllDates,
    Saturdays,
    /// Inclusive range; `start == end` selects a single day.
    Range { start: NaiveDate, end: NaiveDate },
}

impl DateOption {
    /// Builds a range, swapping the bounds when given in reverse.
    pub fn range(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            DateOption::Range { start, end }
        } else {
            DateOption::Range {
                start: end,
                end: start,
            }
        }
    }

    pub fn single_day(day: NaiveDate) -> Self {
        DateOption::Range {
            start: day,
            end: day,
        }
    }

    fn accepts(&self, date: Option<NaiveDate>) -> bool {
        match self {
            DateOption::AllDates => true,
            DateOption::Saturdays => date.is_some_and(|date| date.weekday() == Weekday::Sat),
            DateOption::Range { start, end } => {
                let (low, high) = if start <= end { (start, end) } else { (end, start) };
                date.is_some_and(|date| date >= *low && date <= *high)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePredicate {
    pub column: String,
    pub option: DateOption,
}

/// Identifier selection; `All` is the "no filter" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IdentifierSelection {
    #[default]
    All,
    Only(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierPredicate {
    pub column: String,
    pub selection: IdentifierSelection,
}

/// Membership in a selected set of status values.
///
/// An empty `selected` set passes no row at all. This differs from
/// [`IdentifierSelection::All`]; to disable the predicate leave it out of
/// the [`FilterSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPredicate {
    pub column: String,
    pub selected: BTreeSet<String>,
}

/// Optional predicates combined by logical AND.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    pub date: Option<DatePredicate>,
    pub identifier: Option<IdentifierPredicate>,
    pub category: Option<CategoryPredicate>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date(mut self, column: impl Into<String>, option: DateOption) -> Self {
        self.date = Some(DatePredicate {
            column: column.into(),
            option,
        });
        self
    }

    pub fn with_identifier(mut self, column: impl Into<String>, selection: IdentifierSelection) -> Self {
        self.identifier = Some(IdentifierPredicate {
            column: column.into(),
            selection,
        });
        self
    }

    pub fn with_category<I, S>(mut self, column: impl Into<String>, selected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category = Some(CategoryPredicate {
            column: column.into(),
            selected: selected.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.identifier.is_none() && self.category.is_none()
    }
}

/// A predicate bound to a column position.
enum BoundPredicate<'a> {
    Date(usize, &'a DateOption),
    Identifier(usize, &'a str),
    Category(usize, &'a BTreeSet<String>),
}

impl BoundPredicate<'_> {
    fn accepts(&self, row: &Row) -> bool {
        match self {
            BoundPredicate::Date(index, option) => {
                option.accepts(row.get(*index).and_then(CellValue::date))
            }
            BoundPredicate::Identifier(index, wanted) => {
                row.get(*index).is_some_and(|cell| cell.to_text() == *wanted)
            }
            BoundPredicate::Category(index, selected) => row
                .get(*index)
                .filter(|cell| !cell.is_empty())
                .is_some_and(|cell| selected.contains(&cell.to_text())),
        }
    }
}

/// Returns the rows of `dataset` that satisfy every predicate of `spec`.
///
/// Columns and row order are preserved. A predicate whose column is absent
/// is skipped with a warning.
pub fn filter(dataset: &Dataset, spec: &FilterSpec) -> Dataset {
    let predicates = bind(dataset, spec);
    if predicates.is_empty() {
        return dataset.clone();
    }
    let mut filtered = dataset.clone();
    filtered.retain_rows(|row| predicates.iter().all(|predicate| predicate.accepts(row)));
    debug!(
        before = dataset.row_count(),
        after = filtered.row_count(),
        predicates = predicates.len(),
        "filtered rows"
    );
    filtered
}

fn bind<'a>(dataset: &Dataset, spec: &'a FilterSpec) -> Vec<BoundPredicate<'a>> {
    let mut bound = Vec::new();
    if let Some(date) = &spec.date
        && date.option != DateOption::AllDates
        && let Some(index) = column_or_warn(dataset, &date.column, "date")
    {
        bound.push(BoundPredicate::Date(index, &date.option));
    }
    if let Some(identifier) = &spec.identifier
        && let IdentifierSelection::Only(wanted) = &identifier.selection
        && let Some(index) = column_or_warn(dataset, &identifier.column, "identifier")
    {
        bound.push(BoundPredicate::Identifier(index, wanted));
    }
    if let Some(category) = &spec.category
        && let Some(index) = column_or_warn(dataset, &category.column, "category")
    {
        bound.push(BoundPredicate::Category(index, &category.selected));
    }
    bound
}

fn column_or_warn(dataset: &Dataset, column: &str, predicate: &str) -> Option<usize> {
    let index = dataset.column_index(column);
    if index.is_none() {
        warn!(column, predicate, "filter column not found, predicate skipped");
    }
    index
}
