//! Calculator subcommands.
//!
//! Results are reported through `tracing` in the same display formats the
//! site uses.

use std::path::Path;

use spaceway_core::calculator::format::{lakhs, percent, rupees};
use spaceway_core::report::business_csv;
use spaceway_core::{
    BusinessInput, BusinessMetrics, CalculatorError, PricingAssumptions, PricingInput,
    Seasonality,
};
use tracing::info;

/// Run the pricing projection and log the result.
///
/// # Errors
///
/// Returns [`CalculatorError`] if any value is not a number greater than zero.
pub fn pricing(
    current_price: f64,
    monthly_volume: f64,
    competitor_price: f64,
) -> Result<(), CalculatorError> {
    let input = PricingInput::new(current_price, monthly_volume, competitor_price)?;
    let projection = input.project(&PricingAssumptions::default());

    info!(
        current_revenue = %rupees(projection.current_revenue),
        optimized_price = %format!("₹{:.2}", projection.optimized_price),
        optimized_revenue = %rupees(projection.optimized_revenue),
        increase = %percent(projection.percent_increase),
        "Pricing projection"
    );
    info!(delta = %rupees(projection.revenue_delta()), "Additional monthly revenue");
    Ok(())
}

/// Compute business metrics, log them, and optionally write the CSV report.
///
/// # Errors
///
/// Returns an error if the report cannot be written.
pub async fn turnover(input: &BusinessInput, csv: Option<&Path>) -> std::io::Result<()> {
    let metrics = BusinessMetrics::compute(input, &Seasonality::default());

    info!(
        monthly = %lakhs(metrics.monthly_revenue),
        annual = %lakhs(metrics.annual_revenue),
        net_profit = %lakhs(metrics.net_profit),
        margin = %percent(metrics.profit_margin),
        efficiency = metrics.insights.efficiency.label(),
        "Business metrics"
    );

    if let Some(path) = csv {
        tokio::fs::write(path, business_csv(input, &metrics)).await?;
        info!(path = %path.display(), "Report written");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_rejects_zero_volume() {
        let err = pricing(299.0, 0.0, 279.0).unwrap_err();
        assert_eq!(err.field(), "monthly_volume");
    }

    #[tokio::test]
    async fn test_turnover_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");

        turnover(&BusinessInput::default(), Some(&path)).await.unwrap();

        let csv = std::fs::read_to_string(&path).unwrap();
        assert!(csv.starts_with("Spaceway Turnover Report"));
    }
}
