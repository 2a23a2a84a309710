use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::NaiveDate;
use csv::{StringRecord, StringRecordsIter};
use log::{debug, warn};

use super::error::DataError;
use super::model::{Dataset, Record};

/// Columns the input file must carry (matched by exact header name).
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Order Date",
    "Category",
    "Region",
    "Sales",
    "Profit",
    "Product Name",
];

/// Date formats tried in order. Day-first convention: "03/04/2024" is
/// 3 April, not March 4. ISO dates are unambiguous and also accepted.
const DATE_FORMATS: [&str; 3] = ["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d"];

// ---------------------------------------------------------------------------
// Policy and outcome
// ---------------------------------------------------------------------------

/// What to do with a row whose date (or amount) does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateParsePolicy {
    /// Abort the whole load on the first bad row.
    Strict,
    /// Drop bad rows and report how many were dropped.
    #[default]
    Lenient,
}

/// A cleaned dataset plus load metadata.
#[derive(Debug)]
pub struct LoadOutcome {
    pub dataset: Dataset,
    /// Rows dropped under the lenient policy; always 0 under strict.
    pub dropped_rows: usize,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and preprocess a sales CSV.
///
/// Cleaning rules:
/// * empty numeric cells are zero-filled, empty text cells become `""`;
/// * dates are parsed day-first (`DATE_FORMATS`);
/// * rows whose date or amounts are present but unparseable follow `policy`;
/// * derived columns (year, month name, profit percentage) are computed here.
pub fn load_file(path: &Path, policy: DateParsePolicy) -> Result<LoadOutcome, DataError> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::resolve(&headers)?;

    let (records, dropped_rows) = read_rows(reader.records(), &columns, policy)?;

    if dropped_rows > 0 {
        warn!(
            "dropped {dropped_rows} unparseable rows while loading {}",
            path.display()
        );
    }
    debug!("loaded {} records from {}", records.len(), path.display());

    Ok(LoadOutcome {
        dataset: Dataset::from_records(records),
        dropped_rows,
    })
}

/// Parse a user-supplied date the same way the loader does.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

// ---------------------------------------------------------------------------
// Header resolution
// ---------------------------------------------------------------------------

/// Positions of the required columns within the header row.
struct ColumnIndex {
    order_date: usize,
    category: usize,
    region: usize,
    sales: usize,
    profit: usize,
    product_name: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self, DataError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| DataError::MissingColumn(name.to_string()))
        };
        Ok(ColumnIndex {
            order_date: find("Order Date")?,
            category: find("Category")?,
            region: find("Region")?,
            sales: find("Sales")?,
            profit: find("Profit")?,
            product_name: find("Product Name")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

fn read_rows(
    rows: StringRecordsIter<'_, BufReader<File>>,
    columns: &ColumnIndex,
    policy: DateParsePolicy,
) -> Result<(Vec<Record>, usize), DataError> {
    let mut records = Vec::new();
    let mut dropped = 0usize;

    for (row_no, result) in rows.enumerate() {
        let row = result?;
        // Header is line 1, first data row line 2.
        let line = row_no + 2;

        match parse_row(&row, columns, line) {
            Ok(record) => records.push(record),
            Err(err) => match policy {
                DateParsePolicy::Strict => return Err(err),
                DateParsePolicy::Lenient => {
                    warn!("dropping row: {err}");
                    dropped += 1;
                }
            },
        }
    }

    Ok((records, dropped))
}

fn parse_row(row: &StringRecord, columns: &ColumnIndex, line: usize) -> Result<Record, DataError> {
    let cell = |idx: usize| row.get(idx).unwrap_or("").trim();

    let date_text = cell(columns.order_date);
    let order_date = parse_date(date_text).ok_or_else(|| DataError::DateParse {
        line,
        value: date_text.to_string(),
    })?;

    let sales = parse_amount(cell(columns.sales), "Sales", line)?;
    let profit = parse_amount(cell(columns.profit), "Profit", line)?;

    Ok(Record::new(
        order_date,
        cell(columns.category).to_string(),
        cell(columns.region).to_string(),
        sales,
        profit,
        cell(columns.product_name).to_string(),
    ))
}

/// Missing amounts are zero-filled; present-but-garbage amounts are an error
/// (which the lenient policy then downgrades to a dropped row).
fn parse_amount(s: &str, column: &'static str, line: usize) -> Result<f64, DataError> {
    if s.is_empty() {
        return Ok(0.0);
    }
    s.parse::<f64>().map_err(|_| DataError::NumberParse {
        line,
        column,
        value: s.to_string(),
    })
}
