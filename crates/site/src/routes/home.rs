//! Home page: hero, features, the quick pricing calculator, testimonials
//! carousel and trust signals.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use spaceway_core::calculator::format::{percent, rupees};
use spaceway_core::{PricingAssumptions, PricingInput, PricingProjection};
use tracing::instrument;

use super::chart::{Bar, bars};
use super::layout::Layout;
use crate::filters;
use crate::marketing::{
    Feature, Marketplace, Stat, Testimonial, certifications, hero_stats, home_features,
    marketplaces, testimonials, user_stats, wrap_slide,
};
use crate::state::AppState;

/// Calculator fields and carousel position, all optional.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    pub current_price: Option<String>,
    pub monthly_volume: Option<String>,
    pub competitor_price: Option<String>,
    pub slide: Option<String>,
}

impl HomeQuery {
    /// Whether the calculator form was submitted.
    fn has_calculator_input(&self) -> bool {
        self.current_price.is_some()
            || self.monthly_volume.is_some()
            || self.competitor_price.is_some()
    }
}

/// Values echoed back into the calculator inputs.
#[derive(Debug, Clone, Default)]
pub struct PricingFormView {
    pub current_price: String,
    pub monthly_volume: String,
    pub competitor_price: String,
}

/// Rendered projection.
#[derive(Debug, Clone)]
pub struct PricingView {
    pub current_revenue: String,
    pub optimized_price: String,
    pub optimized_revenue: String,
    pub percent_increase: String,
    pub revenue_delta: String,
    pub chart: Vec<Bar>,
}

impl From<&PricingProjection> for PricingView {
    fn from(projection: &PricingProjection) -> Self {
        Self {
            current_revenue: rupees(projection.current_revenue),
            optimized_price: format!("₹{:.2}", projection.optimized_price),
            optimized_revenue: rupees(projection.optimized_revenue),
            percent_increase: percent(projection.percent_increase),
            revenue_delta: rupees(projection.revenue_delta().max(0.0)),
            chart: bars(
                projection.series.iter().map(|p| (p.name, p.revenue)),
                rupees,
            ),
        }
    }
}

/// Outcome of the calculator for this request.
#[derive(Debug, Clone)]
pub struct CalculatorView {
    pub form: PricingFormView,
    pub result: Option<PricingView>,
    pub error: Option<String>,
}

impl CalculatorView {
    /// Validate and compute from the query; nothing is shown until submitted.
    #[must_use]
    pub fn from_query(query: &HomeQuery, assumptions: &PricingAssumptions) -> Self {
        let form = PricingFormView {
            current_price: query.current_price.clone().unwrap_or_default(),
            monthly_volume: query.monthly_volume.clone().unwrap_or_default(),
            competitor_price: query.competitor_price.clone().unwrap_or_default(),
        };

        if !query.has_calculator_input() {
            return Self {
                form,
                result: None,
                error: None,
            };
        }

        match PricingInput::parse(&form.current_price, &form.monthly_volume, &form.competitor_price)
        {
            Ok(input) => Self {
                result: Some(PricingView::from(&input.project(assumptions))),
                error: None,
                form,
            },
            Err(err) => Self {
                result: None,
                error: Some(err.to_string()),
                form,
            },
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
    pub stats: Vec<Stat>,
    pub features: Vec<Feature>,
    pub calculator: CalculatorView,
    pub testimonials: Vec<Testimonial>,
    pub slide: usize,
    pub prev_slide: usize,
    pub next_slide: usize,
    pub marketplaces: Vec<Marketplace>,
    pub certifications: Vec<Feature>,
    pub user_stats: Vec<Stat>,
}

/// Display the home page.
#[instrument(skip_all)]
pub async fn home(
    State(state): State<AppState>,
    layout: Layout,
    Query(query): Query<HomeQuery>,
) -> impl IntoResponse {
    let testimonials = testimonials();
    let position = query
        .slide
        .as_deref()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(0);
    let slide = wrap_slide(position, testimonials.len());
    let slide_i64 = i64::try_from(slide).unwrap_or(0);

    HomeTemplate {
        layout,
        stats: hero_stats(),
        features: home_features(),
        calculator: CalculatorView::from_query(&query, &state.config().calculator.pricing),
        prev_slide: wrap_slide(slide_i64 - 1, testimonials.len()),
        next_slide: wrap_slide(slide_i64 + 1, testimonials.len()),
        slide,
        testimonials,
        marketplaces: marketplaces(),
        certifications: certifications(),
        user_stats: user_stats(),
    }
}
