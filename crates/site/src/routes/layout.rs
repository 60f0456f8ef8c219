//! Per-page chrome shared by every template (`base.html`).
//!
//! Extracting a [`Layout`] drains the visitor's notice queue, so only
//! handlers that actually render a page should take one. Form handlers that
//! usually redirect take the request [`Parts`] instead and call
//! [`Layout::load`] on the re-render path.

use axum::{extract::FromRequestParts, http::request::Parts};
use spaceway_core::Theme;

use crate::auth::{AuthStore, Notice, SessionStorage, UserProfile, keys, take_notices};
use crate::error::AppError;
use crate::marketing::{FooterColumn, NAV_LINKS, NavLink, footer_columns};
use crate::middleware::CspNonce;

/// Navigation, theme, toasts and the CSP nonce for one rendered page.
#[derive(Debug, Clone)]
pub struct Layout {
    pub theme: Theme,
    pub user: Option<UserProfile>,
    pub notices: Vec<Notice>,
    pub nonce: String,
    pub path: String,
    pub nav: Vec<NavLink>,
    pub footer: Vec<FooterColumn>,
}

impl Layout {
    /// A layout for `path` with no visitor state.
    #[must_use]
    pub fn anonymous(path: &str) -> Self {
        Self {
            theme: Theme::default(),
            user: None,
            notices: Vec::new(),
            nonce: String::new(),
            path: path.to_string(),
            nav: NAV_LINKS.to_vec(),
            footer: footer_columns(),
        }
    }

    /// Whether a nav link points at the current page.
    ///
    /// `/` only matches itself; other links also match their sub-paths.
    #[must_use]
    pub fn is_active(&self, link: &str) -> bool {
        if link == "/" {
            self.path == "/"
        } else {
            self.path == link || self.path.starts_with(&format!("{link}/"))
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Name shown in the navigation bar.
    #[must_use]
    pub fn greeting(&self) -> &str {
        self.user.as_ref().map_or("", UserProfile::greeting_name)
    }

    /// Class on `<html>`.
    #[must_use]
    pub const fn theme_class(&self) -> &'static str {
        self.theme.as_str()
    }

    /// Label of the theme toggle button.
    #[must_use]
    pub const fn theme_toggle_label(&self) -> &'static str {
        if self.theme.is_dark() {
            "Light mode"
        } else {
            "Dark mode"
        }
    }
}

impl<S> FromRequestParts<S> for Layout
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::load(parts).await
    }
}

impl Layout {
    /// Build the layout for a request, draining its notices.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the session store fails.
    pub async fn load(parts: &Parts) -> Result<Self, AppError> {
        let mut layout = Self::anonymous(parts.uri.path());

        if let Some(nonce) = parts.extensions.get::<CspNonce>() {
            layout.nonce = nonce.value().to_string();
        }

        if let Some(store) = parts.extensions.get::<AuthStore>() {
            layout.user = store.snapshot().current_user().cloned();
        }

        if let Some(session) = parts.extensions.get::<tower_sessions::Session>().cloned() {
            let stored = session.get_item(keys::THEME).await?;
            layout.theme = Theme::from_stored(stored.as_deref());
            layout.notices = take_notices(&session).await?;
        }

        Ok(layout)
    }
}
