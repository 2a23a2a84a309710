//! Filtering and aggregation core for a sales reporting dashboard.
//!
//! The crate loads a delimited sales file into a cleaned [`data::model::Dataset`],
//! applies a user's [`data::filter::FilterCriteria`] to get an ordered
//! [`data::filter::FilteredView`], and computes the summary numbers a
//! presentation layer renders. The presentation layer itself lives elsewhere;
//! the `salescope` binary in this crate is only a plain-text reference client.

pub mod data;

pub use data::aggregate::{self, Kpis};
pub use data::error::DataError;
pub use data::filter::{apply, FilterCriteria, FilteredView};
pub use data::loader::{load_file, DateParsePolicy, LoadOutcome};
pub use data::model::{Dataset, MonthKey, Record};
pub use data::session::Session;
