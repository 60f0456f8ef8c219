//! Visitor preferences: the theme toggle and the footer newsletter signup.
//!
//! Both are plain form posts that answer with a redirect back to the page
//! they were submitted from.

use axum::{
    Form,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use spaceway_core::{Email, Theme};
use tower_sessions::Session;
use tracing::instrument;

use crate::auth::{Notice, SessionStorage, keys, push_notice};
use crate::error::AppError;

/// Toast shown after a newsletter signup.
pub const NEWSLETTER_THANKS: &str = "Thanks for subscribing! Look out for our next update.";

/// Theme toggle form.
#[derive(Debug, Default, Deserialize)]
pub struct ThemeForm {
    pub return_to: Option<String>,
}

/// Newsletter signup form.
#[derive(Debug, Default, Deserialize)]
pub struct NewsletterForm {
    #[serde(default)]
    pub email: String,
    pub return_to: Option<String>,
}

/// Local path to send the visitor back to.
///
/// Anything that is not a plain same-site path falls back to `/`, including
/// paths carrying control characters that cannot go in a `Location` header.
#[must_use]
pub fn safe_return_path(raw: Option<&str>) -> &str {
    match raw {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control) =>
        {
            path
        }
        _ => "/",
    }
}

/// Flip between light and dark.
///
/// # Errors
///
/// Returns [`AppError::Storage`] if the session store fails.
#[instrument(skip_all)]
pub async fn toggle_theme(
    session: Session,
    Form(form): Form<ThemeForm>,
) -> Result<Response, AppError> {
    let current = Theme::from_stored(session.get_item(keys::THEME).await?.as_deref());
    let next = current.toggled();
    session.set_item(keys::THEME, next.as_str()).await?;

    tracing::debug!(theme = next.as_str(), "Theme changed");
    Ok(Redirect::to(safe_return_path(form.return_to.as_deref())).into_response())
}

/// Record a newsletter signup.
///
/// # Errors
///
/// Returns [`AppError::Storage`] if the session store fails.
#[instrument(skip_all)]
pub async fn subscribe(
    session: Session,
    Form(form): Form<NewsletterForm>,
) -> Result<Response, AppError> {
    let notice = match Email::parse(form.email.trim()) {
        Ok(email) => {
            tracing::info!(email = %email, "Newsletter subscription received");
            Notice::success(NEWSLETTER_THANKS)
        }
        Err(e) => Notice::error(e.to_string()),
    };

    push_notice(&session, notice).await?;
    Ok(Redirect::to(safe_return_path(form.return_to.as_deref())).into_response())
}
