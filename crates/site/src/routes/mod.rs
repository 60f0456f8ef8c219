//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (pricing calculator, testimonials)
//! GET  /products               - Products, feature tabs (?tab=), pricing plans
//! GET  /turnover               - Business-metrics calculator
//! GET  /turnover/report.csv    - CSV report for the same query
//! GET  /about                  - Team, milestones, values
//! GET  /support                - FAQ (?category=), channels, contact form
//! POST /support                - Support request
//! GET  /demo                   - Demo features (?feature=), request form
//! POST /demo                   - Demo request
//! GET  /privacy, /terms, /cookies, /gdpr - Markdown legal pages
//!
//! # Preferences
//! POST /theme                  - Toggle light/dark, redirect back
//! POST /newsletter             - Footer newsletter signup, redirect back
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login action (rate limited)
//! GET  /register               - Register page
//! POST /register               - Register action (rate limited)
//! POST /logout                 - Logout action
//!
//! # Protected
//! GET  /dashboard              - Signed-in dashboard
//!
//! # Calculator API
//! POST /api/calculator/pricing  - Pricing projection (JSON)
//! POST /api/calculator/turnover - Business metrics (JSON)
//!
//! *                            - Anything else redirects to /
//! ```

pub mod api;
pub mod auth;
pub mod chart;
pub mod dashboard;
pub mod demo;
pub mod home;
pub mod layout;
pub mod pages;
pub mod preferences;
pub mod support;
pub mod turnover;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::content::LEGAL_SLUGS;
use crate::middleware::auth_rate_limiter;
use crate::state::AppState;

pub use layout::Layout;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/login",
            get(auth::login_page).merge(post(auth::login).layer(auth_rate_limiter())),
        )
        .route(
            "/register",
            get(auth::register_page).merge(post(auth::register).layer(auth_rate_limiter())),
        )
        .route("/logout", post(auth::logout))
}

/// Create the calculator API router.
pub fn calculator_api_routes() -> Router<AppState> {
    Router::new()
        .route("/pricing", post(api::calculator::pricing))
        .route("/turnover", post(api::calculator::turnover))
}

/// Create the marketing page routes router.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/products", get(pages::products))
        .route("/about", get(pages::about))
        .route("/turnover", get(turnover::show))
        .route("/turnover/report.csv", get(turnover::report))
        .route("/support", get(support::show).post(support::submit))
        .route("/demo", get(demo::show).post(demo::submit))
        .route("/theme", post(preferences::toggle_theme))
        .route("/newsletter", post(preferences::subscribe))
        .merge(legal_routes())
}

/// One route per legal page, so other single-segment paths fall through.
pub fn legal_routes() -> Router<AppState> {
    LEGAL_SLUGS.iter().fold(Router::new(), |router, slug| {
        router.route(&format!("/{slug}"), get(pages::legal))
    })
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(page_routes())
        .merge(auth_routes())
        .route("/dashboard", get(dashboard::show))
        .nest("/api/calculator", calculator_api_routes())
        .fallback(|| async { Redirect::to("/") })
}
