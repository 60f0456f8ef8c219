//! Quick turnover preview: what an optimized price would do to revenue.
//!
//! # Formula
//!
//! ```text
//! current_revenue   = current_price × monthly_volume
//! optimized_price   = min(competitor_price × 0.95, current_price × 1.10)
//! optimized_revenue = optimized_price × monthly_volume × 1.20
//! percent_increase  = (optimized_revenue − current_revenue) / current_revenue × 100
//!                     when optimized_revenue > current_revenue, else 0
//! ```
//!
//! The optimized price is the tighter of "5% under the competitor" and "10%
//! above the current price". The 1.20 factor is a flat volume uplift assumed
//! to follow from the better price.

use serde::{Deserialize, Serialize};

use super::{CalculatorError, parse_positive, require_positive};

/// Heuristic factors behind the pricing projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingAssumptions {
    /// Multiplier applied to the competitor's price (0.95 = 5% under).
    pub competitor_factor: f64,
    /// Multiplier capping the recommended price (1.10 = at most 10% above current).
    pub price_ceiling_factor: f64,
    /// Multiplier applied to volume at the optimized price (1.20 = 20% uplift).
    pub volume_uplift: f64,
}

impl Default for PricingAssumptions {
    fn default() -> Self {
        Self {
            competitor_factor: 0.95,
            price_ceiling_factor: 1.10,
            volume_uplift: 1.20,
        }
    }
}

/// Validated input for the pricing projection.
///
/// Every field is a finite number strictly greater than zero; the only way to
/// obtain a value is through [`PricingInput::new`] or [`PricingInput::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricingInput {
    current_price: f64,
    monthly_volume: f64,
    competitor_price: f64,
}

impl PricingInput {
    /// Build an input from numeric values.
    ///
    /// # Errors
    ///
    /// Returns [`CalculatorError`] naming the first field that is not a finite
    /// number greater than zero.
    pub fn new(
        current_price: f64,
        monthly_volume: f64,
        competitor_price: f64,
    ) -> Result<Self, CalculatorError> {
        Ok(Self {
            current_price: require_positive("current_price", current_price)?,
            monthly_volume: require_positive("monthly_volume", monthly_volume)?,
            competitor_price: require_positive("competitor_price", competitor_price)?,
        })
    }

    /// Parse raw form values.
    ///
    /// # Errors
    ///
    /// Returns [`CalculatorError`] naming the first field that is empty,
    /// non-numeric, or not greater than zero.
    pub fn parse(
        current_price: &str,
        monthly_volume: &str,
        competitor_price: &str,
    ) -> Result<Self, CalculatorError> {
        Ok(Self {
            current_price: parse_positive("current_price", current_price)?,
            monthly_volume: parse_positive("monthly_volume", monthly_volume)?,
            competitor_price: parse_positive("competitor_price", competitor_price)?,
        })
    }

    #[must_use]
    pub const fn current_price(&self) -> f64 {
        self.current_price
    }

    #[must_use]
    pub const fn monthly_volume(&self) -> f64 {
        self.monthly_volume
    }

    #[must_use]
    pub const fn competitor_price(&self) -> f64 {
        self.competitor_price
    }

    /// Compute the projection for this input.
    #[must_use]
    pub fn project(&self, assumptions: &PricingAssumptions) -> PricingProjection {
        PricingProjection::compute(self, assumptions)
    }
}

/// One bar of the current-vs-optimized chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub name: &'static str,
    pub revenue: f64,
    pub price: f64,
}

/// Derived metrics of the pricing projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingProjection {
    pub current_revenue: f64,
    pub optimized_price: f64,
    pub optimized_revenue: f64,
    /// Never negative.
    pub percent_increase: f64,
    /// `[Current, Optimized]`.
    pub series: [SeriesPoint; 2],
}

impl PricingProjection {
    /// Compute the projection.
    #[must_use]
    pub fn compute(input: &PricingInput, assumptions: &PricingAssumptions) -> Self {
        let current_revenue = input.current_price * input.monthly_volume;
        let optimized_price = (input.competitor_price * assumptions.competitor_factor)
            .min(input.current_price * assumptions.price_ceiling_factor);
        let optimized_revenue = optimized_price * input.monthly_volume * assumptions.volume_uplift;

        let percent_increase = if optimized_revenue > current_revenue {
            (optimized_revenue - current_revenue) / current_revenue * 100.0
        } else {
            0.0
        };

        Self {
            current_revenue,
            optimized_price,
            optimized_revenue,
            percent_increase,
            series: [
                SeriesPoint {
                    name: "Current",
                    revenue: current_revenue,
                    price: input.current_price,
                },
                SeriesPoint {
                    name: "Optimized",
                    revenue: optimized_revenue,
                    price: optimized_price,
                },
            ],
        }
    }

    /// Revenue difference per month (zero or negative when there is no uplift).
    #[must_use]
    pub fn revenue_delta(&self) -> f64 {
        self.optimized_revenue - self.current_revenue
    }
}
