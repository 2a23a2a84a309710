use std::collections::HashSet;

use chrono::NaiveDate;

use super::error::DataError;
use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// FilterCriteria – the conjunction of predicates a record must satisfy
// ---------------------------------------------------------------------------

/// One user's filter settings.
///
/// A record passes when its date lies in `[start_date, end_date]`, its
/// category and region are in the selected sets, and its sales amount lies in
/// `[sales_min, sales_max]` (all bounds inclusive).
///
/// An empty category or region set matches nothing. There is no implicit
/// "empty means all" fallback; a caller that wants everything selects
/// everything (see [`FilterCriteria::accept_all`]).
///
/// Inverted ranges (start after end, min above max) are legitimate and simply
/// match nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub categories: HashSet<String>,
    pub regions: HashSet<String>,
    pub sales_min: f64,
    pub sales_max: f64,
}

impl FilterCriteria {
    /// Criteria matching every record of `dataset`: the full date span, every
    /// category and region, the full sales span. These are the dashboard's
    /// widget defaults.
    pub fn accept_all(dataset: &Dataset) -> Self {
        let (start_date, end_date) = dataset
            .date_span
            .unwrap_or((NaiveDate::MIN, NaiveDate::MAX));
        let (sales_min, sales_max) = dataset.sales_span.unwrap_or((f64::MIN, f64::MAX));
        FilterCriteria {
            start_date,
            end_date,
            categories: dataset.categories.iter().cloned().collect(),
            regions: dataset.regions.iter().cloned().collect(),
            sales_min,
            sales_max,
        }
    }

    /// Replace the sales range, rejecting non-finite bounds.
    pub fn set_sales_range(&mut self, low: f64, high: f64) -> Result<(), DataError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(DataError::InvalidRange { low, high });
        }
        self.sales_min = low;
        self.sales_max = high;
        Ok(())
    }

    fn matches(&self, rec: &Record) -> bool {
        rec.order_date >= self.start_date
            && rec.order_date <= self.end_date
            && self.categories.contains(&rec.category)
            && self.regions.contains(&rec.region)
            && rec.sales >= self.sales_min
            && rec.sales <= self.sales_max
    }
}

// ---------------------------------------------------------------------------
// FilteredView – the records passing the current criteria
// ---------------------------------------------------------------------------

/// An owned, ordered snapshot of the records passing a [`FilterCriteria`].
///
/// Recomputed on every criteria change and discarded after rendering; it
/// shares no state with the [`Dataset`] it came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView {
    pub records: Vec<Record>,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Apply `criteria` to `dataset` in one linear pass.
///
/// Pure: the dataset is untouched and the result preserves the original
/// relative order. Category/region membership tests are constant-time hash
/// lookups, so the whole pass is O(n) in dataset size.
pub fn apply(dataset: &Dataset, criteria: &FilterCriteria) -> FilteredView {
    let records = dataset
        .records
        .iter()
        .filter(|rec| criteria.matches(rec))
        .cloned()
        .collect();
    FilteredView { records }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_dataset() -> Dataset {
        Dataset::from_records(vec![
            Record::new(date(2024, 1, 5), "A".into(), "East".into(), 100.0, 10.0, "P1".into()),
            Record::new(date(2024, 2, 10), "B".into(), "West".into(), 200.0, -20.0, "P2".into()),
        ])
    }

    #[test]
    fn accept_all_returns_everything_in_order() {
        let ds = sample_dataset();
        let view = apply(&ds, &FilterCriteria::accept_all(&ds));
        assert_eq!(view.records, ds.records);
    }

    #[test]
    fn all_four_predicates_must_hold() {
        let ds = sample_dataset();
        let mut criteria = FilterCriteria::accept_all(&ds);

        criteria.categories.remove("B");
        let view = apply(&ds, &criteria);
        assert_eq!(view.len(), 1);
        assert_eq!(view.records[0].product_name, "P1");

        let mut criteria = FilterCriteria::accept_all(&ds);
        criteria.regions.remove("East");
        let view = apply(&ds, &criteria);
        assert_eq!(view.len(), 1);
        assert_eq!(view.records[0].product_name, "P2");

        let mut criteria = FilterCriteria::accept_all(&ds);
        criteria.end_date = date(2024, 1, 31);
        let view = apply(&ds, &criteria);
        assert_eq!(view.len(), 1);
        assert_eq!(view.records[0].product_name, "P1");
    }

    #[test]
    fn sales_range_bounds_are_inclusive() {
        let ds = sample_dataset();
        let mut criteria = FilterCriteria::accept_all(&ds);
        criteria.set_sales_range(150.0, 1000.0).unwrap();
        let view = apply(&ds, &criteria);
        assert_eq!(view.len(), 1);
        assert_eq!(view.records[0].sales, 200.0);

        criteria.set_sales_range(100.0, 200.0).unwrap();
        assert_eq!(apply(&ds, &criteria).len(), 2);
    }

    #[test]
    fn empty_selection_set_matches_nothing() {
        let ds = sample_dataset();
        let mut criteria = FilterCriteria::accept_all(&ds);
        criteria.categories.clear();
        assert!(apply(&ds, &criteria).is_empty());
    }

    #[test]
    fn inverted_ranges_yield_empty_view_not_error() {
        let ds = sample_dataset();
        let mut criteria = FilterCriteria::accept_all(&ds);
        criteria.start_date = date(2025, 1, 1);
        criteria.end_date = date(2024, 1, 1);
        assert!(apply(&ds, &criteria).is_empty());

        let mut criteria = FilterCriteria::accept_all(&ds);
        criteria.set_sales_range(500.0, 100.0).unwrap();
        assert!(apply(&ds, &criteria).is_empty());
    }

    #[test]
    fn non_finite_sales_bounds_are_rejected() {
        let ds = sample_dataset();
        let mut criteria = FilterCriteria::accept_all(&ds);
        let err = criteria.set_sales_range(f64::NAN, 10.0).unwrap_err();
        assert!(matches!(err, DataError::InvalidRange { .. }));
    }

    #[test]
    fn apply_does_not_mutate_the_dataset() {
        let ds = sample_dataset();
        let before = ds.records.clone();
        let mut criteria = FilterCriteria::accept_all(&ds);
        criteria.categories.clear();
        let _ = apply(&ds, &criteria);
        assert_eq!(ds.records, before);
    }

    #[test]
    fn apply_is_deterministic() {
        let ds = sample_dataset();
        let criteria = FilterCriteria::accept_all(&ds);
        assert_eq!(apply(&ds, &criteria), apply(&ds, &criteria));
    }
}
