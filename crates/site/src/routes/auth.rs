//! Authentication route handlers.
//!
//! Handles login, registration and logout against the auth backend through
//! the request's [`AuthStore`](crate::auth::AuthStore).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    body::Bytes,
    extract::Query,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use super::layout::Layout;
use crate::auth::{AuthOutcome, FieldErrors, LoginForm, Notice, RegisterForm, push_notice};
use crate::error::{AppError, add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::marketing::{ServiceOption, service_options};
use crate::middleware::AuthContext;

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for error display.
#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub layout: Layout,
    pub error: Option<String>,
    pub email: String,
    pub errors: FieldErrors,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub layout: Layout,
    pub error: Option<String>,
    pub form: RegisterForm,
    pub errors: FieldErrors,
    pub services: Vec<ServiceOption>,
}

fn failure_redirect(path: &str, message: &str) -> Response {
    Redirect::to(&format!("{path}?error={}", urlencoding::encode(message))).into_response()
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(layout: Layout, Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        layout,
        error: query.error,
        email: String::new(),
        errors: FieldErrors::default(),
    }
}

/// Handle login form submission.
///
/// Invalid fields re-render the form; a rejected login comes back to
/// `/login` with the backend's message.
///
/// # Errors
///
/// Returns [`AppError::Storage`] if the session store fails.
pub async fn login(
    AuthContext(store): AuthContext,
    parts: Parts,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let email = form.email.trim().to_string();

    let credentials = match form.validate() {
        Ok(credentials) => credentials,
        Err(errors) => {
            let template = LoginTemplate {
                layout: Layout::load(&parts).await?,
                error: None,
                email,
                errors,
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
        }
    };

    match store.login(&credentials).await? {
        AuthOutcome::Success => {
            set_sentry_user(Some(credentials.email.as_str()));
            add_breadcrumb("auth", "Signed in", None);
            Ok(Redirect::to("/dashboard").into_response())
        }
        AuthOutcome::Failure { message, .. } => {
            tracing::info!(email = %credentials.email, "Login rejected");
            Ok(failure_redirect("/login", &message))
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(
    layout: Layout,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    RegisterTemplate {
        layout,
        error: query.error,
        form: RegisterForm::default(),
        errors: FieldErrors::default(),
        services: service_options(),
    }
}

/// Handle registration form submission.
///
/// The body is decoded by hand because `services` repeats. A `401` from the
/// backend sends the visitor to the login page instead of back to the form.
///
/// # Errors
///
/// Returns [`AppError::Storage`] if the session store fails.
pub async fn register(
    AuthContext(store): AuthContext,
    parts: Parts,
    body: Bytes,
) -> Result<Response, AppError> {
    let form = RegisterForm::from_urlencoded(&body);

    let profile = match form.validate() {
        Ok(profile) => profile,
        Err(errors) => {
            let template = RegisterTemplate {
                layout: Layout::load(&parts).await?,
                error: None,
                form: RegisterForm {
                    password: String::new(),
                    ..form
                },
                errors,
                services: service_options(),
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
        }
    };

    match store.register(&profile).await? {
        AuthOutcome::Success => {
            set_sentry_user(Some(profile.email.as_str()));
            push_notice(
                store.storage(),
                Notice::success("Welcome to Spaceway! Your account is ready."),
            )
            .await?;
            Ok(Redirect::to("/dashboard").into_response())
        }
        AuthOutcome::Failure {
            message,
            unauthorized,
        } => {
            tracing::info!(email = %profile.email, unauthorized, "Registration rejected");
            let path = if unauthorized { "/login" } else { "/register" };
            Ok(failure_redirect(path, &message))
        }
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Sign out and return to the login page.
///
/// # Errors
///
/// Returns [`AppError::Storage`] if the session store fails.
pub async fn logout(AuthContext(store): AuthContext) -> Result<Response, AppError> {
    store.logout().await?;
    clear_sentry_user();
    push_notice(store.storage(), Notice::info("You have been signed out.")).await?;
    Ok(Redirect::to("/login").into_response())
}
