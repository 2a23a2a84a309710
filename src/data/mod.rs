/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  sales_data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read + clean rows, parse dates, derive columns
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Record>, unique categories/regions, value spans
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply FilterCriteria → FilteredView (order preserved)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  KPIs, monthly trend, per-group sums, top-N products
///   └───────────┘
/// ```
///
/// The presentation layer (whatever renders the numbers) sits on top of
/// [`session::Session`], which holds the shared dataset together with the
/// current criteria and the cached filtered view.

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod session;
