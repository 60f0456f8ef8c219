//! Mostly-static pages: products, about, and the markdown legal pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::Uri,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use super::layout::Layout;
use crate::content::{LEGAL_SLUGS, Page};
use crate::error::AppError;
use crate::filters;
use crate::marketing::{
    Feature, Milestone, PricingPlan, ProductFeature, Stat, TeamMember, milestones, pricing_plans,
    product_features, tab_index, team, values,
};
use crate::state::AppState;

/// Selected tab on a tabbed page.
#[derive(Debug, Default, Deserialize)]
pub struct TabQuery {
    pub tab: Option<String>,
}

// =============================================================================
// Products
// =============================================================================

/// Products page template.
#[derive(Template, WebTemplate)]
#[template(path = "products.html")]
pub struct ProductsTemplate {
    pub layout: Layout,
    pub features: Vec<ProductFeature>,
    pub active: ProductFeature,
    pub plans: Vec<PricingPlan>,
    pub highlights: Vec<Stat>,
}

/// Display the products page with the `?tab=` feature selected.
#[instrument(skip_all)]
pub async fn products(
    layout: Layout,
    Query(query): Query<TabQuery>,
) -> Result<impl IntoResponse, AppError> {
    let features = product_features();
    let index = tab_index(features.iter().map(|f| f.id), query.tab.as_deref());
    let active = features
        .get(index)
        .cloned()
        .ok_or_else(|| AppError::Internal("product feature list is empty".to_string()))?;

    Ok(ProductsTemplate {
        layout,
        active,
        features,
        plans: pricing_plans(),
        highlights: vec![
            Stat { value: "10,000+", label: "Active Sellers" },
            Stat { value: "35%", label: "Avg. Profit Increase" },
            Stat { value: "24/7", label: "Price Monitoring" },
        ],
    })
}

// =============================================================================
// About
// =============================================================================

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub layout: Layout,
    pub team: Vec<TeamMember>,
    pub milestones: Vec<Milestone>,
    pub values: Vec<Feature>,
}

/// Display the about page.
pub async fn about(layout: Layout) -> impl IntoResponse {
    AboutTemplate {
        layout,
        team: team(),
        milestones: milestones(),
        values: values(),
    }
}

// =============================================================================
// Legal
// =============================================================================

/// Legal page template.
#[derive(Template, WebTemplate)]
#[template(path = "legal.html")]
pub struct LegalTemplate {
    pub layout: Layout,
    pub page: Page,
    pub related: Vec<&'static str>,
}

impl LegalTemplate {
    /// Human title for a sibling legal page link.
    #[must_use]
    pub fn title_for(slug: &str) -> &'static str {
        match slug {
            "privacy" => "Privacy Policy",
            "terms" => "Terms of Service",
            "cookies" => "Cookie Policy",
            "gdpr" => "GDPR",
            _ => "",
        }
    }

    /// `(slug, title)` pairs for the sibling pages.
    #[must_use]
    pub fn related_links(&self) -> Vec<(&'static str, &'static str)> {
        self.related
            .iter()
            .map(|slug| (*slug, Self::title_for(slug)))
            .collect()
    }
}

/// Display one of the markdown legal pages; the slug is the request path.
///
/// # Errors
///
/// Returns [`AppError::NotFound`] for slugs outside the legal set or pages
/// missing from the content directory.
#[instrument(skip_all, fields(path = %uri.path()))]
pub async fn legal(
    State(state): State<AppState>,
    layout: Layout,
    uri: Uri,
) -> Result<impl IntoResponse, AppError> {
    let slug = uri.path().trim_start_matches('/');
    if !LEGAL_SLUGS.contains(&slug) {
        return Err(AppError::NotFound(format!("page {slug}")));
    }

    let page = state
        .content()
        .get_page(slug)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("page {slug}")))?;

    Ok(LegalTemplate {
        layout,
        related: LEGAL_SLUGS.iter().copied().filter(|s| *s != slug).collect(),
        page,
    })
}
