//! Turnover calculators.
//!
//! Two independent tools share the same shape: an input record validated at
//! the boundary, and a pure projection computed from it.
//!
//! - [`pricing`] - Quick turnover preview: current price vs. an optimized
//!   price derived from the competitor's price.
//! - [`business`] - Business-metrics projection: monthly and annual revenue,
//!   profit, a seasonal monthly series, and insights.
//!
//! The heuristics both tools rely on (5% under competitor, 10% price ceiling,
//! 20% volume uplift, 20% seasonal swing) are marketing assumptions rather
//! than derived figures, so they are carried as [`PricingAssumptions`] and
//! [`Seasonality`] values that callers may override.

pub mod business;
pub mod format;
pub mod pricing;

pub use business::{
    BusinessInput, BusinessMetrics, EfficiencyRating, Insights, MarginDistribution, Seasonality,
};
pub use pricing::{PricingAssumptions, PricingInput, PricingProjection, SeriesPoint};

/// Message shown for any rejected calculator field.
pub const INVALID_INPUT_MESSAGE: &str = "Please enter valid numbers greater than 0";

/// Errors produced when validating calculator input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculatorError {
    /// The field is empty or does not parse as a finite number.
    #[error("Please enter valid numbers greater than 0")]
    NotANumber {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The field parsed but is zero or negative.
    #[error("Please enter valid numbers greater than 0")]
    NotPositive {
        /// Name of the offending field.
        field: &'static str,
    },
}

impl CalculatorError {
    /// Name of the field that failed validation.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::NotANumber { field } | Self::NotPositive { field } => field,
        }
    }
}

/// Parse a raw form value as a finite number strictly greater than zero.
///
/// # Errors
///
/// Returns [`CalculatorError::NotANumber`] for empty, non-numeric, NaN or
/// infinite input, and [`CalculatorError::NotPositive`] for zero or negative
/// values.
pub fn parse_positive(field: &'static str, raw: &str) -> Result<f64, CalculatorError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| CalculatorError::NotANumber { field })?;
    require_positive(field, value)
}

/// Check that an already-numeric value is finite and strictly greater than zero.
///
/// # Errors
///
/// Same as [`parse_positive`].
pub fn require_positive(field: &'static str, value: f64) -> Result<f64, CalculatorError> {
    if !value.is_finite() {
        return Err(CalculatorError::NotANumber { field });
    }
    if value <= 0.0 {
        return Err(CalculatorError::NotPositive { field });
    }
    Ok(value)
}
