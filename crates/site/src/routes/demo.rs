//! Product demo page and the demo request form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::Query,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use spaceway_core::{ContactNumber, Email};
use tracing::instrument;

use super::layout::Layout;
use crate::auth::{FieldErrors, Notice, push_notice};
use crate::error::AppError;
use crate::filters;
use crate::marketing::{DemoFeature, Stat, demo_features, demo_stats, tab_index};

/// Toast shown after a demo request is accepted.
pub const DEMO_THANKS: &str = "Thank you! We'll schedule your demo within 24 hours.";

/// Selected feature tab.
#[derive(Debug, Default, Deserialize)]
pub struct DemoQuery {
    pub feature: Option<String>,
}

/// Raw demo request. Phone is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DemoForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub message: String,
}

/// A demo request that passed validation.
#[derive(Debug, Clone)]
pub struct DemoRequest {
    pub name: String,
    pub email: Email,
    pub phone: Option<ContactNumber>,
    pub company: String,
}

impl DemoForm {
    /// Check every field.
    ///
    /// # Errors
    ///
    /// Returns each failing field with its message.
    pub fn validate(&self) -> Result<DemoRequest, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert("name", "Name is required");
        }
        let email = Email::parse(self.email.trim())
            .map_err(|e| errors.insert("email", e.to_string()))
            .ok();

        let phone = self.phone.trim();
        let phone = if phone.is_empty() {
            None
        } else {
            ContactNumber::parse(phone)
                .map_err(|e| errors.insert("phone", e.to_string()))
                .ok()
        };

        let company = self.company.trim();
        if company.is_empty() {
            errors.insert("company", "Company name is required");
        }

        match email {
            Some(email) if errors.is_empty() => Ok(DemoRequest {
                name: name.to_string(),
                email,
                phone,
                company: company.to_string(),
            }),
            _ => Err(errors),
        }
    }
}

/// Demo page template.
#[derive(Template, WebTemplate)]
#[template(path = "demo.html")]
pub struct DemoTemplate {
    pub layout: Layout,
    pub features: Vec<DemoFeature>,
    pub active: DemoFeature,
    pub stats: Vec<Stat>,
    pub form: DemoForm,
    pub errors: FieldErrors,
}

impl DemoTemplate {
    fn new(
        layout: Layout,
        feature: Option<&str>,
        form: DemoForm,
        errors: FieldErrors,
    ) -> Result<Self, AppError> {
        let features = demo_features();
        let index = tab_index(features.iter().map(|f| f.id), feature);
        let active = features
            .get(index)
            .cloned()
            .ok_or_else(|| AppError::Internal("demo feature list is empty".to_string()))?;

        Ok(Self {
            layout,
            features,
            active,
            stats: demo_stats(),
            form,
            errors,
        })
    }
}

/// Display the demo page.
#[instrument(skip_all)]
pub async fn show(
    layout: Layout,
    Query(query): Query<DemoQuery>,
) -> Result<impl IntoResponse, AppError> {
    DemoTemplate::new(
        layout,
        query.feature.as_deref(),
        DemoForm::default(),
        FieldErrors::default(),
    )
}

/// Accept a demo request.
///
/// # Errors
///
/// Returns [`AppError::Storage`] if the session store fails.
#[instrument(skip_all)]
pub async fn submit(parts: Parts, Form(form): Form<DemoForm>) -> Result<Response, AppError> {
    let request = match form.validate() {
        Ok(request) => request,
        Err(errors) => {
            let layout = Layout::load(&parts).await?;
            let template = DemoTemplate::new(layout, None, form, errors)?;
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
        }
    };

    tracing::info!(
        email = %request.email,
        company = %request.company,
        has_phone = request.phone.is_some(),
        "Demo request received"
    );

    if let Some(session) = parts.extensions.get::<tower_sessions::Session>() {
        push_notice(session, Notice::success(DEMO_THANKS)).await?;
    }
    Ok(Redirect::to("/demo").into_response())
}
