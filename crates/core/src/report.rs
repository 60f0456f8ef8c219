//! CSV export of a business-metrics projection.

use std::fmt::Write as _;

use crate::calculator::{BusinessInput, BusinessMetrics};

/// Suggested download name for [`business_csv`].
pub const REPORT_FILENAME: &str = "spaceway_turnover_report.csv";

/// Render the turnover report as CSV.
///
/// Layout is a title row, a blank row, the inputs block, a blank row and the
/// results block. Amounts are written with two decimals and no digit grouping
/// so that no value contains a comma.
#[must_use]
pub fn business_csv(input: &BusinessInput, metrics: &BusinessMetrics) -> String {
    let mut out = String::new();
    let mut row = |cells: &[&str]| {
        let _ = writeln!(out, "{}", cells.join(","));
    };

    row(&["Spaceway Turnover Report"]);
    row(&[]);
    row(&["Inputs:"]);
    row(&["Products", &input.products().to_string()]);
    row(&["Average Sale (₹)", &input.avg_sale().to_string()]);
    row(&["Sales per Month", &input.frequency().to_string()]);
    row(&["Profit Margin (%)", &input.margin().to_string()]);
    row(&["Operating Costs (%)", &input.costs().to_string()]);
    row(&[]);
    row(&["Results:"]);
    row(&["Monthly Revenue (₹)", &amount(metrics.monthly_revenue)]);
    row(&["Annual Revenue (₹)", &amount(metrics.annual_revenue)]);
    row(&["Gross Profit (₹)", &amount(metrics.gross_profit)]);
    row(&["Net Profit (₹)", &amount(metrics.net_profit)]);
    row(&["Profit Margin (%)", &amount(metrics.profit_margin)]);

    out
}

fn amount(value: f64) -> String {
    format!("{value:.2}")
}
