//! Support centre: FAQ tabs, contact channels, resources and the support
//! request form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::Query,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use spaceway_core::Email;
use tracing::instrument;

use super::layout::Layout;
use crate::auth::{FieldErrors, Notice, push_notice};
use crate::error::AppError;
use crate::filters;
use crate::marketing::{
    FaqCategory, Resource, SupportChannel, faq_categories, resources, support_channels, tab_index,
};

/// Toast shown after a support request is accepted.
pub const SUPPORT_THANKS: &str = "Thank you! We'll get back to you within 4 hours.";

/// Accepted priorities, in display order.
pub const PRIORITIES: [&str; 4] = ["low", "medium", "high", "urgent"];

/// Selected FAQ category.
#[derive(Debug, Default, Deserialize)]
pub struct SupportQuery {
    pub category: Option<String>,
}

/// Raw support request.
#[derive(Debug, Clone, Deserialize)]
pub struct SupportForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    #[serde(default = "default_priority")]
    pub priority: String,
}

fn default_priority() -> String {
    "medium".to_string()
}

impl Default for SupportForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            subject: String::new(),
            message: String::new(),
            priority: default_priority(),
        }
    }
}

impl SupportForm {
    /// Check every field.
    ///
    /// # Errors
    ///
    /// Returns each failing field with its message.
    pub fn validate(&self) -> Result<Email, FieldErrors> {
        let mut errors = FieldErrors::default();

        if self.name.trim().is_empty() {
            errors.insert("name", "Name is required");
        }
        let email = Email::parse(self.email.trim())
            .map_err(|e| errors.insert("email", e.to_string()))
            .ok();
        if self.subject.trim().is_empty() {
            errors.insert("subject", "Subject is required");
        }
        if self.message.trim().is_empty() {
            errors.insert("message", "Message is required");
        }
        if !PRIORITIES.contains(&self.priority.as_str()) {
            errors.insert("priority", "Choose a priority");
        }

        match email {
            Some(email) if errors.is_empty() => Ok(email),
            _ => Err(errors),
        }
    }
}

/// Support page template.
#[derive(Template, WebTemplate)]
#[template(path = "support.html")]
pub struct SupportTemplate {
    pub layout: Layout,
    pub categories: Vec<FaqCategory>,
    pub active: FaqCategory,
    pub channels: Vec<SupportChannel>,
    pub resources: Vec<Resource>,
    pub form: SupportForm,
    pub errors: FieldErrors,
    pub priorities: Vec<&'static str>,
}

impl SupportTemplate {
    fn new(
        layout: Layout,
        category: Option<&str>,
        form: SupportForm,
        errors: FieldErrors,
    ) -> Result<Self, AppError> {
        let categories = faq_categories();
        let index = tab_index(categories.iter().map(|c| c.slug), category);
        let active = categories
            .get(index)
            .cloned()
            .ok_or_else(|| AppError::Internal("FAQ category list is empty".to_string()))?;

        Ok(Self {
            layout,
            categories,
            active,
            channels: support_channels(),
            resources: resources(),
            form,
            errors,
            priorities: PRIORITIES.to_vec(),
        })
    }
}

/// Display the support page.
#[instrument(skip_all)]
pub async fn show(
    layout: Layout,
    Query(query): Query<SupportQuery>,
) -> Result<impl IntoResponse, AppError> {
    SupportTemplate::new(
        layout,
        query.category.as_deref(),
        SupportForm::default(),
        FieldErrors::default(),
    )
}

/// Accept a support request.
///
/// # Errors
///
/// Returns [`AppError::Storage`] if the session store fails.
#[instrument(skip_all)]
pub async fn submit(parts: Parts, Form(form): Form<SupportForm>) -> Result<Response, AppError> {
    let email = match form.validate() {
        Ok(email) => email,
        Err(errors) => {
            let layout = Layout::load(&parts).await?;
            let template = SupportTemplate::new(layout, None, form, errors)?;
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
        }
    };

    tracing::info!(
        email = %email,
        priority = %form.priority,
        subject = %form.subject.trim(),
        "Support request received"
    );

    if let Some(session) = parts.extensions.get::<tower_sessions::Session>() {
        push_notice(session, Notice::success(SUPPORT_THANKS)).await?;
    }
    Ok(Redirect::to("/support").into_response())
}
