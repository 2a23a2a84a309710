use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::Parser;

use salescope::data::aggregate;
use salescope::data::loader::{self, DateParsePolicy};
use salescope::{FilteredView, Session};

/// Plain-text sales report: KPIs, monthly trend, category/region totals,
/// and the top products, over an optionally filtered CSV.
#[derive(Parser, Debug)]
#[command(name = "salescope", version, about)]
struct Cli {
    /// Input CSV with Order Date, Category, Region, Sales, Profit,
    /// Product Name columns
    input: PathBuf,

    /// Abort on the first unparseable row instead of dropping it
    #[arg(long)]
    strict: bool,

    /// Start of the date range, day-first (e.g. 01/01/2024)
    #[arg(long)]
    from: Option<String>,

    /// End of the date range, day-first
    #[arg(long)]
    to: Option<String>,

    /// Keep only this category (repeatable)
    #[arg(long)]
    category: Vec<String>,

    /// Keep only this region (repeatable)
    #[arg(long)]
    region: Vec<String>,

    /// Lower bound for the sales amount (inclusive)
    #[arg(long)]
    sales_min: Option<f64>,

    /// Upper bound for the sales amount (inclusive)
    #[arg(long)]
    sales_max: Option<f64>,

    /// Number of rows in the top-products table
    #[arg(long, default_value_t = 10)]
    top: usize,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let policy = if cli.strict {
        DateParsePolicy::Strict
    } else {
        DateParsePolicy::Lenient
    };

    let outcome = loader::load_file(&cli.input, policy)
        .map_err(|e| anyhow!("loading {}: {e}", cli.input.display()))?;
    if outcome.dropped_rows > 0 {
        eprintln!("note: dropped {} unparseable rows", outcome.dropped_rows);
    }

    let mut session = Session::new(Arc::new(outcome.dataset));
    apply_cli_filters(&mut session, &cli)?;

    print_report(&session, cli.top);
    Ok(())
}

/// Translate the command-line flags into criteria changes. Unspecified flags
/// leave the accept-all defaults in place.
fn apply_cli_filters(session: &mut Session, cli: &Cli) -> Result<()> {
    let mut criteria = session.criteria().clone();

    if let Some(from) = &cli.from {
        criteria.start_date = parse_cli_date(from)?;
    }
    if let Some(to) = &cli.to {
        criteria.end_date = parse_cli_date(to)?;
    }
    if !cli.category.is_empty() {
        criteria.categories = cli.category.iter().cloned().collect();
    }
    if !cli.region.is_empty() {
        criteria.regions = cli.region.iter().cloned().collect();
    }
    if cli.sales_min.is_some() || cli.sales_max.is_some() {
        let low = cli.sales_min.unwrap_or(criteria.sales_min);
        let high = cli.sales_max.unwrap_or(criteria.sales_max);
        criteria.set_sales_range(low, high)?;
    }

    session.set_criteria(criteria);
    Ok(())
}

fn parse_cli_date(s: &str) -> Result<NaiveDate> {
    loader::parse_date(s)
        .ok_or_else(|| anyhow!("'{s}' is not a valid day-first date (expected e.g. 31/01/2024)"))
}

// ---------------------------------------------------------------------------
// Report rendering
// ---------------------------------------------------------------------------

fn print_report(session: &Session, top_n: usize) {
    let view = session.view();

    println!("Sales Report");
    println!("============");
    println!(
        "{} of {} records match the current filters\n",
        view.len(),
        session.dataset().len()
    );

    print_kpis(view);
    print_table("Monthly Sales Trend", monthly_rows(view));
    print_table("Sales by Category", aggregate::category_sales(view));
    print_table("Sales by Region", aggregate::region_sales(view));
    print_table(
        &format!("Top {top_n} Products by Sales"),
        aggregate::top_products_by_sales(view, top_n),
    );
}

fn print_kpis(view: &FilteredView) {
    let kpis = aggregate::kpis(view);
    println!("Total Sales:         {:>14.2}", kpis.total_sales);
    println!("Total Profit:        {:>14.2}", kpis.total_profit);
    match kpis.average_order_value {
        Some(avg) => println!("Average Order Value: {avg:>14.2}"),
        None => println!("Average Order Value:        no data"),
    }
    println!();
}

fn monthly_rows(view: &FilteredView) -> Vec<(String, f64)> {
    aggregate::monthly_sales_trend(view)
        .into_iter()
        .map(|(month, total)| (month.to_string(), total))
        .collect()
}

fn print_table(title: &str, rows: Vec<(String, f64)>) {
    println!("{title}");
    println!("{}", "-".repeat(title.len()));
    if rows.is_empty() {
        println!("(no data)");
    }
    for (key, total) in rows {
        println!("{key:<24} {total:>14.2}");
    }
    println!();
}
