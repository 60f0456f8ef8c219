//! Signed-in dashboard.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tracing::instrument;

use super::layout::Layout;
use crate::filters;
use crate::marketing::{Feature, dashboard_benefits};
use crate::middleware::RequireAuth;

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub layout: Layout,
    pub name: String,
    pub email: Option<String>,
    pub benefits: Vec<Feature>,
}

/// Display the dashboard. Anonymous visitors are sent to `/login`.
#[instrument(skip_all)]
pub async fn show(RequireAuth(session): RequireAuth, layout: Layout) -> impl IntoResponse {
    let user = session.current_user();

    DashboardTemplate {
        name: user.map_or("there", |u| u.greeting_name()).to_string(),
        email: user.and_then(|u| u.email.clone()),
        benefits: dashboard_benefits(),
        layout,
    }
}
