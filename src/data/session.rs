use std::sync::Arc;

use chrono::NaiveDate;

use super::error::DataError;
use super::filter::{apply, FilterCriteria, FilteredView};
use super::model::Dataset;

// ---------------------------------------------------------------------------
// Session – one user's filter state over the shared dataset
// ---------------------------------------------------------------------------

/// One interactive session: the shared read-only dataset, the current filter
/// criteria, and the cached filtered view.
///
/// The dataset is injected (loaded once per process, shared behind `Arc`);
/// the session never mutates it. Every criteria change recomputes the view,
/// so the same criteria always produce the same view.
pub struct Session {
    dataset: Arc<Dataset>,
    criteria: FilterCriteria,
    view: FilteredView,
}

impl Session {
    /// Start a session with everything selected.
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let criteria = FilterCriteria::accept_all(&dataset);
        let view = apply(&dataset, &criteria);
        Session {
            dataset,
            criteria,
            view,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// The records passing the current criteria, in original order.
    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    /// Replace the criteria wholesale and refilter.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.refilter();
    }

    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) {
        self.criteria.start_date = start;
        self.criteria.end_date = end;
        self.refilter();
    }

    pub fn set_sales_range(&mut self, low: f64, high: f64) -> Result<(), DataError> {
        self.criteria.set_sales_range(low, high)?;
        self.refilter();
        Ok(())
    }

    /// Toggle a single category in or out of the selection.
    pub fn toggle_category(&mut self, name: &str) {
        if !self.criteria.categories.remove(name) {
            self.criteria.categories.insert(name.to_string());
        }
        self.refilter();
    }

    /// Toggle a single region in or out of the selection.
    pub fn toggle_region(&mut self, name: &str) {
        if !self.criteria.regions.remove(name) {
            self.criteria.regions.insert(name.to_string());
        }
        self.refilter();
    }

    pub fn select_all_categories(&mut self) {
        self.criteria.categories = self.dataset.categories.iter().cloned().collect();
        self.refilter();
    }

    pub fn select_no_categories(&mut self) {
        self.criteria.categories.clear();
        self.refilter();
    }

    pub fn select_all_regions(&mut self) {
        self.criteria.regions = self.dataset.regions.iter().cloned().collect();
        self.refilter();
    }

    pub fn select_no_regions(&mut self) {
        self.criteria.regions.clear();
        self.refilter();
    }

    fn refilter(&mut self) {
        self.view = apply(&self.dataset, &self.criteria);
    }
}

#[cfg(test)]
mod tests {
    use super::super::model::Record;
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn session() -> Session {
        let dataset = Dataset::from_records(vec![
            Record::new(date(2024, 1, 5), "A".into(), "East".into(), 100.0, 10.0, "P1".into()),
            Record::new(date(2024, 2, 10), "B".into(), "West".into(), 200.0, -20.0, "P2".into()),
        ]);
        Session::new(Arc::new(dataset))
    }

    #[test]
    fn new_session_shows_everything() {
        let s = session();
        assert_eq!(s.view().len(), 2);
    }

    #[test]
    fn toggling_a_category_refilters() {
        let mut s = session();
        s.toggle_category("B");
        assert_eq!(s.view().len(), 1);
        assert_eq!(s.view().records[0].product_name, "P1");

        s.toggle_category("B");
        assert_eq!(s.view().len(), 2);
    }

    #[test]
    fn select_none_then_all_round_trips() {
        let mut s = session();
        s.select_no_regions();
        assert!(s.view().is_empty());
        s.select_all_regions();
        assert_eq!(s.view().len(), 2);
    }

    #[test]
    fn same_criteria_give_same_view() {
        let mut s = session();
        s.set_date_range(date(2024, 1, 1), date(2024, 12, 31));
        let first = s.view().clone();
        s.set_date_range(date(2024, 1, 1), date(2024, 12, 31));
        assert_eq!(*s.view(), first);
    }

    #[test]
    fn sessions_do_not_interfere() {
        let dataset = Arc::new(Dataset::from_records(vec![Record::new(
            date(2024, 1, 5),
            "A".into(),
            "East".into(),
            100.0,
            10.0,
            "P1".into(),
        )]));
        let mut a = Session::new(Arc::clone(&dataset));
        let b = Session::new(Arc::clone(&dataset));

        a.select_no_categories();
        assert!(a.view().is_empty());
        assert_eq!(b.view().len(), 1);
    }
}
