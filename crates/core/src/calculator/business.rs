//! Business-metrics projection for the "Know Your Turnover" page.
//!
//! # Formula
//!
//! ```text
//! monthly_revenue = products × avg_sale × frequency
//! annual_revenue  = monthly_revenue × 12
//! gross_profit    = annual_revenue × margin% / 100
//! operating_costs = annual_revenue × costs% / 100
//! net_profit      = gross_profit − operating_costs
//! profit_margin   = net_profit / annual_revenue × 100   (0 when annual is 0)
//! ```
//!
//! The monthly series is synthetic: month `i` (0-11) is
//! `round(monthly_revenue × (sin(i·π/6) × 0.2 + 1))`. It is illustrative
//! seasonality, not history.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::{CalculatorError, parse_positive, require_positive};

/// Month labels for the seasonal series.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Sinusoidal seasonality applied to monthly revenue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Seasonality {
    /// Peak deviation from the monthly average (0.2 = ±20%).
    pub amplitude: f64,
    /// Months per half-cycle of the sine wave.
    pub half_period_months: f64,
}

impl Default for Seasonality {
    fn default() -> Self {
        Self {
            amplitude: 0.2,
            half_period_months: 6.0,
        }
    }
}

impl Seasonality {
    /// Multiplier for month index `month` (0 = January).
    #[must_use]
    pub fn factor(&self, month: u8) -> f64 {
        (f64::from(month) * PI / self.half_period_months).sin() * self.amplitude + 1.0
    }

    /// Twelve rounded monthly figures around `monthly_revenue`.
    #[must_use]
    pub fn series(&self, monthly_revenue: f64) -> [f64; 12] {
        let mut out = [0.0; 12];
        for (month, slot) in (0u8..).zip(out.iter_mut()) {
            *slot = (monthly_revenue * self.factor(month)).round();
        }
        out
    }
}

/// Validated business inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BusinessInput {
    products: f64,
    avg_sale: f64,
    frequency: f64,
    margin: f64,
    costs: f64,
}

impl Default for BusinessInput {
    /// The figures the turnover page opens with.
    fn default() -> Self {
        Self {
            products: 500.0,
            avg_sale: 150.0,
            frequency: 10.0,
            margin: 25.0,
            costs: 15.0,
        }
    }
}

impl BusinessInput {
    /// Build an input from numeric values.
    ///
    /// # Errors
    ///
    /// Returns [`CalculatorError`] naming the first field that is not a finite
    /// number greater than zero.
    pub fn new(
        products: f64,
        avg_sale: f64,
        frequency: f64,
        margin: f64,
        costs: f64,
    ) -> Result<Self, CalculatorError> {
        Ok(Self {
            products: require_positive("products", products)?,
            avg_sale: require_positive("avg_sale", avg_sale)?,
            frequency: require_positive("frequency", frequency)?,
            margin: require_positive("margin", margin)?,
            costs: require_positive("costs", costs)?,
        })
    }

    /// Parse raw form values.
    ///
    /// # Errors
    ///
    /// Returns [`CalculatorError`] naming the first invalid field.
    pub fn parse(
        products: &str,
        avg_sale: &str,
        frequency: &str,
        margin: &str,
        costs: &str,
    ) -> Result<Self, CalculatorError> {
        Ok(Self {
            products: parse_positive("products", products)?,
            avg_sale: parse_positive("avg_sale", avg_sale)?,
            frequency: parse_positive("frequency", frequency)?,
            margin: parse_positive("margin", margin)?,
            costs: parse_positive("costs", costs)?,
        })
    }

    #[must_use]
    pub const fn products(&self) -> f64 {
        self.products
    }

    #[must_use]
    pub const fn avg_sale(&self) -> f64 {
        self.avg_sale
    }

    #[must_use]
    pub const fn frequency(&self) -> f64 {
        self.frequency
    }

    #[must_use]
    pub const fn margin(&self) -> f64 {
        self.margin
    }

    #[must_use]
    pub const fn costs(&self) -> f64 {
        self.costs
    }
}

/// How the resulting profit margin compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyRating {
    Excellent,
    Good,
    BelowAverage,
}

impl EfficiencyRating {
    /// Rate a profit margin percentage: above 15 is excellent, above 10 good.
    #[must_use]
    pub fn for_margin(profit_margin: f64) -> Self {
        if profit_margin > 15.0 {
            Self::Excellent
        } else if profit_margin > 10.0 {
            Self::Good
        } else {
            Self::BelowAverage
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::BelowAverage => "below average",
        }
    }
}

/// Share of revenue going to margin, costs, and everything else (percent).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarginDistribution {
    pub margin: f64,
    pub costs: f64,
    pub other: f64,
}

/// What-if figures shown under the charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Insights {
    /// Extra annual profit from a 20% higher average sale.
    pub growth_opportunity: f64,
    pub efficiency: EfficiencyRating,
    /// Annual revenue if the product count doubled.
    pub scale_impact: f64,
    /// Extra net profit from cutting operating costs by 5% of revenue.
    pub cost_optimization: f64,
}

/// Derived business metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessMetrics {
    pub monthly_revenue: f64,
    pub annual_revenue: f64,
    pub gross_profit: f64,
    pub operating_costs: f64,
    pub net_profit: f64,
    pub profit_margin: f64,
    pub monthly_series: [f64; 12],
    pub distribution: MarginDistribution,
    pub insights: Insights,
}

impl BusinessMetrics {
    /// Compute all metrics for an input.
    #[must_use]
    pub fn compute(input: &BusinessInput, seasonality: &Seasonality) -> Self {
        let monthly_revenue = input.products * input.avg_sale * input.frequency;
        let annual_revenue = monthly_revenue * 12.0;
        let gross_profit = (annual_revenue * input.margin) / 100.0;
        let operating_costs = (annual_revenue * input.costs) / 100.0;
        let net_profit = gross_profit - operating_costs;
        let profit_margin = if annual_revenue > 0.0 {
            (net_profit / annual_revenue) * 100.0
        } else {
            0.0
        };

        Self {
            monthly_revenue,
            annual_revenue,
            gross_profit,
            operating_costs,
            net_profit,
            profit_margin,
            monthly_series: seasonality.series(monthly_revenue),
            distribution: MarginDistribution {
                margin: input.margin,
                costs: input.costs,
                other: (100.0 - input.margin - input.costs).max(0.0),
            },
            insights: Insights {
                growth_opportunity: annual_revenue * 0.2 * input.margin / 100.0,
                efficiency: EfficiencyRating::for_margin(profit_margin),
                scale_impact: annual_revenue * 2.0,
                cost_optimization: annual_revenue * 0.05,
            },
        }
    }

    /// Bar chart rows: revenue, gross profit, operating costs, net profit.
    #[must_use]
    pub fn overview(&self) -> [(&'static str, f64); 4] {
        [
            ("Revenue", self.annual_revenue),
            ("Gross Profit", self.gross_profit),
            ("Operating Costs", self.operating_costs),
            ("Net Profit", self.net_profit),
        ]
    }
}
