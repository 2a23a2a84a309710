use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Record – one sales transaction (one row of the source file)
// ---------------------------------------------------------------------------

/// A single cleaned sales transaction, including the columns derived at load
/// time (year, month name, profit percentage).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub order_date: NaiveDate,
    pub category: String,
    pub region: String,
    pub sales: f64,
    pub profit: f64,
    pub product_name: String,

    /// Calendar year of `order_date`.
    pub year: i32,
    /// Full English month name ("January", …).
    pub month_name: String,
    /// `profit / sales * 100`; NaN when `sales` is zero.
    pub profit_pct: f64,
}

impl Record {
    /// Build a record and compute its derived columns.
    pub fn new(
        order_date: NaiveDate,
        category: String,
        region: String,
        sales: f64,
        profit: f64,
        product_name: String,
    ) -> Self {
        let profit_pct = if sales == 0.0 {
            f64::NAN
        } else {
            profit / sales * 100.0
        };
        Record {
            year: order_date.year(),
            month_name: order_date.format("%B").to_string(),
            profit_pct,
            order_date,
            category,
            region,
            sales,
            profit,
            product_name,
        }
    }

    /// Calendar-month grouping key for this record.
    pub fn month_key(&self) -> MonthKey {
        MonthKey::from_date(self.order_date)
    }
}

// ---------------------------------------------------------------------------
// MonthKey – year+month grouping key
// ---------------------------------------------------------------------------

/// A calendar month (year + month), ordered chronologically.
///
/// Grouping on this rather than the month name keeps January 2023 and
/// January 2024 apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn from_date(date: NaiveDate) -> Self {
        MonthKey {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full cleaned dataset with pre-computed column indices.
///
/// Immutable after construction; sessions share it behind an `Arc` and only
/// ever read from it.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records in file order.
    pub records: Vec<Record>,
    /// Unique categories in order of first occurrence.
    pub categories: Vec<String>,
    /// Unique regions in order of first occurrence.
    pub regions: Vec<String>,
    /// Earliest and latest order date, `None` for an empty dataset.
    pub date_span: Option<(NaiveDate, NaiveDate)>,
    /// Smallest and largest sales amount, `None` for an empty dataset.
    pub sales_span: Option<(f64, f64)>,
}

impl Dataset {
    /// Build the column indices from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut categories: Vec<String> = Vec::new();
        let mut regions: Vec<String> = Vec::new();
        let mut date_span: Option<(NaiveDate, NaiveDate)> = None;
        let mut sales_span: Option<(f64, f64)> = None;

        for rec in &records {
            // Linear scan is fine: these columns have a handful of values.
            if !categories.contains(&rec.category) {
                categories.push(rec.category.clone());
            }
            if !regions.contains(&rec.region) {
                regions.push(rec.region.clone());
            }
            date_span = Some(match date_span {
                Some((lo, hi)) => (lo.min(rec.order_date), hi.max(rec.order_date)),
                None => (rec.order_date, rec.order_date),
            });
            sales_span = Some(match sales_span {
                Some((lo, hi)) => (lo.min(rec.sales), hi.max(rec.sales)),
                None => (rec.sales, rec.sales),
            });
        }

        Dataset {
            records,
            categories,
            regions,
            date_span,
            sales_span,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn derived_columns() {
        let rec = Record::new(
            date(2024, 1, 5),
            "Furniture".into(),
            "East".into(),
            200.0,
            50.0,
            "Desk".into(),
        );
        assert_eq!(rec.year, 2024);
        assert_eq!(rec.month_name, "January");
        assert_eq!(rec.profit_pct, 25.0);
    }

    #[test]
    fn zero_sales_profit_pct_is_nan() {
        let rec = Record::new(
            date(2024, 1, 5),
            "Furniture".into(),
            "East".into(),
            0.0,
            10.0,
            "Desk".into(),
        );
        assert!(rec.profit_pct.is_nan());
    }

    #[test]
    fn month_key_orders_across_years() {
        let dec = MonthKey::from_date(date(2023, 12, 31));
        let jan = MonthKey::from_date(date(2024, 1, 1));
        assert!(dec < jan);
        assert_eq!(jan.to_string(), "2024-01");
    }

    #[test]
    fn dataset_indices_use_first_occurrence_order() {
        let records = vec![
            Record::new(date(2024, 2, 1), "B".into(), "West".into(), 200.0, 5.0, "P2".into()),
            Record::new(date(2024, 1, 1), "A".into(), "East".into(), 100.0, 5.0, "P1".into()),
            Record::new(date(2024, 3, 1), "B".into(), "East".into(), 50.0, 5.0, "P3".into()),
        ];
        let ds = Dataset::from_records(records);
        assert_eq!(ds.categories, vec!["B", "A"]);
        assert_eq!(ds.regions, vec!["West", "East"]);
        assert_eq!(ds.date_span, Some((date(2024, 1, 1), date(2024, 3, 1))));
        assert_eq!(ds.sales_span, Some((50.0, 200.0)));
    }

    #[test]
    fn empty_dataset_has_no_spans() {
        let ds = Dataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.date_span, None);
        assert_eq!(ds.sales_span, None);
    }
}
