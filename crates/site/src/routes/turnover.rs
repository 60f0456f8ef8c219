//! Business-metrics turnover calculator and its CSV report.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
};
use serde::Deserialize;
use spaceway_core::calculator::business::MONTH_LABELS;
use spaceway_core::calculator::format::{lakhs, percent, rupees};
use spaceway_core::report::{REPORT_FILENAME, business_csv};
use spaceway_core::{BusinessInput, BusinessMetrics, CalculatorError};
use tracing::instrument;

use super::chart::{Bar, bars, size_step};
use super::layout::Layout;
use crate::error::AppError;
use crate::filters;
use crate::state::AppState;

/// Raw calculator fields. Missing fields take the calculator defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TurnoverQuery {
    pub products: Option<String>,
    pub avg_sale: Option<String>,
    pub frequency: Option<String>,
    pub margin: Option<String>,
    pub costs: Option<String>,
}

impl TurnoverQuery {
    /// Raw values with defaults filled in, in field order.
    fn values(&self) -> [String; 5] {
        let defaults = BusinessInput::default();
        let pick = |raw: &Option<String>, default: f64| {
            raw.clone().unwrap_or_else(|| default.to_string())
        };
        [
            pick(&self.products, defaults.products()),
            pick(&self.avg_sale, defaults.avg_sale()),
            pick(&self.frequency, defaults.frequency()),
            pick(&self.margin, defaults.margin()),
            pick(&self.costs, defaults.costs()),
        ]
    }

    /// Validate into a calculator input.
    ///
    /// # Errors
    ///
    /// Returns [`CalculatorError`] naming the first invalid field.
    pub fn parse(&self) -> Result<BusinessInput, CalculatorError> {
        let [products, avg_sale, frequency, margin, costs] = self.values();
        BusinessInput::parse(&products, &avg_sale, &frequency, &margin, &costs)
    }

    /// Query string reproducing these inputs (for the report link).
    fn to_query_string(&self) -> String {
        let [products, avg_sale, frequency, margin, costs] = self.values();
        [
            ("products", products),
            ("avg_sale", avg_sale),
            ("frequency", frequency),
            ("margin", margin),
            ("costs", costs),
        ]
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
    }
}

/// One slider/number input on the form.
#[derive(Debug, Clone)]
pub struct InputField {
    pub name: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub max: u32,
    pub step: u32,
    pub value: String,
}

fn input_fields(query: &TurnoverQuery) -> Vec<InputField> {
    let [products, avg_sale, frequency, margin, costs] = query.values();
    vec![
        InputField {
            name: "products",
            label: "Number of Products",
            unit: "products",
            max: 50_000,
            step: 10,
            value: products,
        },
        InputField {
            name: "avg_sale",
            label: "Average Sale Value",
            unit: "₹",
            max: 5_000,
            step: 5,
            value: avg_sale,
        },
        InputField {
            name: "frequency",
            label: "Sales per Month",
            unit: "sales",
            max: 1_000,
            step: 1,
            value: frequency,
        },
        InputField {
            name: "margin",
            label: "Profit Margin",
            unit: "%",
            max: 100,
            step: 1,
            value: margin,
        },
        InputField {
            name: "costs",
            label: "Operating Costs",
            unit: "%",
            max: 50,
            step: 1,
            value: costs,
        },
    ]
}

/// A headline metric card.
#[derive(Debug, Clone)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: String,
}

/// A segment of the margin distribution bar.
#[derive(Debug, Clone)]
pub struct Segment {
    pub label: &'static str,
    pub value: String,
    pub size: u8,
    pub class: &'static str,
}

/// Rendered metrics.
#[derive(Debug, Clone)]
pub struct MetricsView {
    pub cards: Vec<MetricCard>,
    pub monthly_chart: Vec<Bar>,
    pub overview_chart: Vec<Bar>,
    pub distribution: Vec<Segment>,
    pub growth_opportunity: String,
    pub profit_margin: String,
    pub efficiency: &'static str,
    pub scale_impact: String,
    pub cost_optimization: String,
}

impl From<&BusinessMetrics> for MetricsView {
    fn from(metrics: &BusinessMetrics) -> Self {
        let distribution = metrics.distribution;
        let total = distribution.margin + distribution.costs + distribution.other;

        Self {
            cards: vec![
                MetricCard { label: "Monthly Revenue", value: lakhs(metrics.monthly_revenue) },
                MetricCard { label: "Annual Revenue", value: lakhs(metrics.annual_revenue) },
                MetricCard { label: "Net Profit", value: lakhs(metrics.net_profit) },
                MetricCard { label: "Profit Margin", value: percent(metrics.profit_margin) },
            ],
            monthly_chart: bars(
                MONTH_LABELS.iter().copied().zip(metrics.monthly_series.iter().copied()),
                rupees,
            ),
            overview_chart: bars(metrics.overview(), lakhs),
            distribution: vec![
                Segment {
                    label: "Profit Margin",
                    value: percent(distribution.margin),
                    size: size_step(distribution.margin, total),
                    class: "segment-margin",
                },
                Segment {
                    label: "Operating Costs",
                    value: percent(distribution.costs),
                    size: size_step(distribution.costs, total),
                    class: "segment-costs",
                },
                Segment {
                    label: "Other",
                    value: percent(distribution.other),
                    size: size_step(distribution.other, total),
                    class: "segment-other",
                },
            ],
            growth_opportunity: lakhs(metrics.insights.growth_opportunity),
            profit_margin: percent(metrics.profit_margin),
            efficiency: metrics.insights.efficiency.label(),
            scale_impact: lakhs(metrics.insights.scale_impact),
            cost_optimization: lakhs(metrics.insights.cost_optimization),
        }
    }
}

/// Turnover calculator page template.
#[derive(Template, WebTemplate)]
#[template(path = "turnover.html")]
pub struct TurnoverTemplate {
    pub layout: Layout,
    pub fields: Vec<InputField>,
    pub metrics: Option<MetricsView>,
    pub error: Option<String>,
    pub report_href: String,
}

/// Display the calculator with metrics for the query (or the defaults).
#[instrument(skip_all)]
pub async fn show(
    State(state): State<AppState>,
    layout: Layout,
    Query(query): Query<TurnoverQuery>,
) -> impl IntoResponse {
    let seasonality = state.config().calculator.seasonality;
    let (metrics, error) = match query.parse() {
        Ok(input) => (
            Some(MetricsView::from(&BusinessMetrics::compute(&input, &seasonality))),
            None,
        ),
        Err(err) => {
            tracing::debug!(field = err.field(), "Turnover input rejected");
            (None, Some(err.to_string()))
        }
    };

    TurnoverTemplate {
        layout,
        fields: input_fields(&query),
        report_href: format!("/turnover/report.csv?{}", query.to_query_string()),
        metrics,
        error,
    }
}

/// Download the CSV report for the query.
///
/// # Errors
///
/// Returns `422` with the validation message if any field is invalid.
#[instrument(skip_all)]
pub async fn report(
    State(state): State<AppState>,
    Query(query): Query<TurnoverQuery>,
) -> Result<impl IntoResponse, AppError> {
    let input = query.parse()?;
    let metrics = BusinessMetrics::compute(&input, &state.config().calculator.seasonality);

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{REPORT_FILENAME}\""),
            ),
        ],
        business_csv(&input, &metrics),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use spaceway_core::Seasonality;

    #[test]
    fn test_missing_fields_use_defaults() {
        let input = TurnoverQuery::default().parse().unwrap();
        assert_eq!(input, BusinessInput::default());
    }

    #[test]
    fn test_invalid_field_is_named() {
        let query = TurnoverQuery {
            margin: Some("-3".to_string()),
            ..TurnoverQuery::default()
        };
        assert_eq!(query.parse().unwrap_err().field(), "margin");
    }

    #[test]
    fn test_report_link_keeps_inputs() {
        let query = TurnoverQuery {
            products: Some("20".to_string()),
            ..TurnoverQuery::default()
        };
        assert_eq!(
            query.to_query_string(),
            "products=20&avg_sale=150&frequency=10&margin=25&costs=15"
        );
    }

    #[test]
    fn test_metrics_view_for_defaults() {
        let metrics = BusinessMetrics::compute(&BusinessInput::default(), &Seasonality::default());
        let view = MetricsView::from(&metrics);

        // 500 × 150 × 10 = 7,50,000 a month
        assert_eq!(view.cards[0].value, "₹7.5L");
        assert_eq!(view.cards[1].value, "₹90.0L");
        assert_eq!(view.cards[3].value, "10.0%");
        assert_eq!(view.efficiency, "below average");
        assert_eq!(view.monthly_chart.len(), 12);
        assert_eq!(view.distribution[2].value, "60.0%");
    }
}
