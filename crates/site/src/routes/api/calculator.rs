//! Calculator JSON API.
//!
//! Same arithmetic as the pages, for clients that render their own charts.
//! Invalid input answers `422` with `{ "message", "field" }`.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use spaceway_core::calculator::format::{lakhs, percent, rupees};
use spaceway_core::{BusinessInput, BusinessMetrics, PricingInput, PricingProjection};
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;

/// Pricing calculator request.
#[derive(Debug, Deserialize)]
pub struct PricingRequest {
    pub current_price: f64,
    pub monthly_volume: f64,
    pub competitor_price: f64,
}

/// Pricing projection with display strings.
#[derive(Debug, Serialize)]
pub struct PricingResponse {
    #[serde(flatten)]
    pub projection: PricingProjection,
    pub display: PricingDisplay,
}

/// Pre-formatted pricing figures.
#[derive(Debug, Serialize)]
pub struct PricingDisplay {
    pub current_revenue: String,
    pub optimized_price: String,
    pub optimized_revenue: String,
    pub percent_increase: String,
}

/// Turnover calculator request.
#[derive(Debug, Deserialize)]
pub struct TurnoverRequest {
    pub products: f64,
    pub avg_sale: f64,
    pub frequency: f64,
    pub margin: f64,
    pub costs: f64,
}

/// Business metrics with display strings.
#[derive(Debug, Serialize)]
pub struct TurnoverResponse {
    #[serde(flatten)]
    pub metrics: BusinessMetrics,
    pub display: TurnoverDisplay,
}

/// Pre-formatted headline metrics.
#[derive(Debug, Serialize)]
pub struct TurnoverDisplay {
    pub monthly_revenue: String,
    pub annual_revenue: String,
    pub net_profit: String,
    pub profit_margin: String,
}

/// `POST /api/calculator/pricing`
///
/// # Errors
///
/// Returns [`AppError::Calculator`] if any value is not a number above zero.
#[instrument(skip_all)]
pub async fn pricing(
    State(state): State<AppState>,
    Json(body): Json<PricingRequest>,
) -> Result<Json<PricingResponse>, AppError> {
    let input = PricingInput::new(body.current_price, body.monthly_volume, body.competitor_price)?;
    let projection = input.project(&state.config().calculator.pricing);

    Ok(Json(PricingResponse {
        display: PricingDisplay {
            current_revenue: rupees(projection.current_revenue),
            optimized_price: format!("₹{:.2}", projection.optimized_price),
            optimized_revenue: rupees(projection.optimized_revenue),
            percent_increase: percent(projection.percent_increase),
        },
        projection,
    }))
}

/// `POST /api/calculator/turnover`
///
/// # Errors
///
/// Returns [`AppError::Calculator`] if any value is not a number above zero.
#[instrument(skip_all)]
pub async fn turnover(
    State(state): State<AppState>,
    Json(body): Json<TurnoverRequest>,
) -> Result<Json<TurnoverResponse>, AppError> {
    let input = BusinessInput::new(
        body.products,
        body.avg_sale,
        body.frequency,
        body.margin,
        body.costs,
    )?;
    let metrics = BusinessMetrics::compute(&input, &state.config().calculator.seasonality);

    Ok(Json(TurnoverResponse {
        display: TurnoverDisplay {
            monthly_revenue: lakhs(metrics.monthly_revenue),
            annual_revenue: lakhs(metrics.annual_revenue),
            net_profit: lakhs(metrics.net_profit),
            profit_margin: percent(metrics.profit_margin),
        },
        metrics,
    }))
}
