//! Filtering and aggregation over normalized delivery datasets.
//!
//! - **filter**: the declarative [`FilterSpec`] and [`filter`]
//! - **shorten**: display keys for driver identifiers
//! - **selection**: choices offered before filtering (drivers, exceptions, date range)
//! - **aggregate**: per-driver [`SummaryRow`](nozyk_model::SummaryRow)s and overviews

pub mod aggregate;
mod dedupe;
pub mod filter;
pub mod selection;
pub mod shorten;

pub use aggregate::{
    AddressColumns, AddressCounts, ExceptionOverview, address_counts, exception_overview, summarize,
};
pub use filter::{
    CategoryPredicate, DateOption, DatePredicate, FilterSpec, IdentifierPredicate,
    IdentifierSelection, filter,
};
pub use selection::{available_categories, date_bounds, identifier_options, resolve_identifier};
pub use shorten::shorten_identifier;
