use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::filter::FilteredView;
use super::model::{MonthKey, Record};

// ---------------------------------------------------------------------------
// Scalar KPIs
// ---------------------------------------------------------------------------

/// The headline metrics of a filtered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub total_sales: f64,
    pub total_profit: f64,
    /// Mean sales per order; `None` when the view is empty. An empty view is
    /// a normal outcome of a narrow filter, not an error, but its mean is
    /// undefined and must not masquerade as zero.
    pub average_order_value: Option<f64>,
}

/// Compute the scalar KPIs in one pass.
pub fn kpis(view: &FilteredView) -> Kpis {
    let total_sales: f64 = view.records.iter().map(|r| r.sales).sum();
    let total_profit: f64 = view.records.iter().map(|r| r.profit).sum();
    let average_order_value = if view.is_empty() {
        None
    } else {
        Some(total_sales / view.len() as f64)
    };
    Kpis {
        total_sales,
        total_profit,
        average_order_value,
    }
}

// ---------------------------------------------------------------------------
// Grouped sums
// ---------------------------------------------------------------------------

/// Sales summed per calendar month, in chronological order.
///
/// Grouping is on year+month, so the same month of different years stays
/// separate.
pub fn monthly_sales_trend(view: &FilteredView) -> Vec<(MonthKey, f64)> {
    let mut by_month: BTreeMap<MonthKey, f64> = BTreeMap::new();
    for rec in &view.records {
        *by_month.entry(rec.month_key()).or_insert(0.0) += rec.sales;
    }
    by_month.into_iter().collect()
}

/// Sales summed per category, in order of first occurrence.
pub fn category_sales(view: &FilteredView) -> Vec<(String, f64)> {
    group_sum(view, |rec| &rec.category)
}

/// Sales summed per region, in order of first occurrence.
pub fn region_sales(view: &FilteredView) -> Vec<(String, f64)> {
    group_sum(view, |rec| &rec.region)
}

/// The `n` products with the largest summed sales, descending.
///
/// The sort is stable over first-occurrence order, so ties resolve the same
/// way on every run over the same input.
pub fn top_products_by_sales(view: &FilteredView, n: usize) -> Vec<(String, f64)> {
    let mut totals = group_sum(view, |rec| &rec.product_name);
    totals.sort_by(|a, b| b.1.total_cmp(&a.1));
    totals.truncate(n);
    totals
}

/// Sum sales per key, keeping keys in order of first occurrence.
fn group_sum<'a>(
    view: &'a FilteredView,
    key: impl Fn(&'a Record) -> &'a str,
) -> Vec<(String, f64)> {
    let mut order: Vec<&str> = Vec::new();
    let mut sums: HashMap<&str, f64> = HashMap::new();

    for rec in &view.records {
        let k = key(rec);
        match sums.get_mut(k) {
            Some(total) => *total += rec.sales,
            None => {
                sums.insert(k, rec.sales);
                order.push(k);
            }
        }
    }

    order
        .into_iter()
        .map(|k| (k.to_string(), sums[k]))
        .collect()
}
