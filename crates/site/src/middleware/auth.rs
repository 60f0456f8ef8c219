//! Auth context middleware, the route guard, and auth extractors.
//!
//! [`auth_context_middleware`] builds one [`AuthStore`] per request over the
//! visitor's session, resolves the stored token, and puts the store in the
//! request extensions. Handlers read it through:
//!
//! - [`RequireAuth`] - protected pages; applies [`guard`]
//! - [`CurrentAuth`] - any page; the (possibly anonymous) session snapshot
//! - [`AuthContext`] - login/register/logout handlers that drive the store

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::auth::{AuthStore, Session};
use crate::error::{AppError, set_sentry_user};
use crate::state::AppState;

/// What the guard lets a protected page do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Auth state not resolved yet; render nothing.
    Pending,
    Allow,
    RedirectToLogin,
}

/// Decide how a protected page responds to a session.
#[must_use]
pub fn guard(session: &Session) -> GuardDecision {
    if session.loading {
        GuardDecision::Pending
    } else if session.is_authenticated() {
        GuardDecision::Allow
    } else {
        GuardDecision::RedirectToLogin
    }
}

/// Build and initialize the request's auth store.
///
/// A stored token the backend no longer accepts ends the request: storage is
/// cleared and the visitor is sent to `/login` (or answered `401` under
/// `/api/`), whichever page they asked for.
///
/// Requests outside the session layer pass through untouched; their guards
/// see a pending session.
///
/// # Errors
///
/// Returns [`AppError::Storage`] if the session store fails.
pub async fn auth_context_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(session) = request.extensions().get::<tower_sessions::Session>().cloned() else {
        tracing::warn!("Session missing from request extensions - layer order may be wrong");
        return Ok(next.run(request).await);
    };

    let store = AuthStore::new(
        Arc::new(session),
        state.api().clone(),
        state.validation_cache().clone(),
    );
    let resolved = store.initialize().await?;

    if resolved.token_rejected {
        let rejection = if request.uri().path().starts_with("/api/") {
            AuthRejection::Unauthorized
        } else {
            AuthRejection::RedirectToLogin
        };
        return Ok(rejection.into_response());
    }

    if let Some(user) = resolved.session.current_user() {
        set_sentry_user(user.email.as_deref());
    }

    request.extensions_mut().insert(store);
    Ok(next.run(request).await)
}

/// Extractor for protected pages.
///
/// ```rust,ignore
/// async fn dashboard(RequireAuth(session): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", session.current_user().map_or("there", |u| u.greeting_name()))
/// }
/// ```
pub struct RequireAuth(pub Arc<Session>);

/// Why a protected page did not run.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthRejection {
    /// Auth still resolving: empty `204`.
    Pending,
    /// Replace the page with the login form.
    RedirectToLogin,
    /// `401` for API requests.
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Pending => StatusCode::NO_CONTENT.into_response(),
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = current_session(parts);

        match guard(&session) {
            GuardDecision::Allow => Ok(Self(session)),
            GuardDecision::Pending => Err(AuthRejection::Pending),
            GuardDecision::RedirectToLogin if parts.uri.path().starts_with("/api/") => {
                Err(AuthRejection::Unauthorized)
            }
            GuardDecision::RedirectToLogin => Err(AuthRejection::RedirectToLogin),
        }
    }
}

/// The current session snapshot, whatever its state.
pub struct CurrentAuth(pub Arc<Session>);

impl<S> FromRequestParts<S> for CurrentAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(current_session(parts)))
    }
}

/// The request's auth store, for handlers that change auth state.
pub struct AuthContext(pub AuthStore);

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthStore>()
            .cloned()
            .map(Self)
            .ok_or_else(|| AppError::Internal("auth store missing from request".to_string()))
    }
}

fn current_session(parts: &Parts) -> Arc<Session> {
    parts
        .extensions
        .get::<AuthStore>()
        .map_or_else(|| Arc::new(Session::pending()), AuthStore::snapshot)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Router, body::Body, http::header::LOCATION, routing::get};
    use secrecy::SecretString;
    use tower::ServiceExt;

    use super::*;
    use crate::auth::UserProfile;

    fn user() -> UserProfile {
        UserProfile {
            email: Some("asha@example.com".to_string()),
            ..UserProfile::default()
        }
    }

    #[test]
    fn test_guard_decisions() {
        assert_eq!(guard(&Session::pending()), GuardDecision::Pending);
        assert_eq!(guard(&Session::anonymous()), GuardDecision::RedirectToLogin);
        assert_eq!(
            guard(&Session::authenticated(SecretString::from("tok"), user())),
            GuardDecision::Allow
        );
    }

    #[test]
    fn test_guard_requires_both_token_and_user() {
        let token_only = Session {
            token: Some(SecretString::from("tok")),
            user: None,
            loading: false,
        };
        assert_eq!(guard(&token_only), GuardDecision::RedirectToLogin);

        let empty_token = Session::authenticated(SecretString::from(""), user());
        assert_eq!(guard(&empty_token), GuardDecision::RedirectToLogin);
    }

    #[tokio::test]
    async fn test_pending_renders_nothing() {
        // No auth middleware: the store never resolves.
        let app = Router::new().route("/dashboard", get(|_: RequireAuth| async { "secret" }));

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/dashboard")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn test_rejections() {
        let redirect = AuthRejection::RedirectToLogin.into_response();
        assert_eq!(redirect.status(), StatusCode::SEE_OTHER);
        assert_eq!(redirect.headers().get(LOCATION).unwrap(), "/login");

        assert_eq!(
            AuthRejection::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
