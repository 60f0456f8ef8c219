//! Integration tests for the Spaceway site.
//!
//! Each test starts two servers on ephemeral ports: a stub auth backend and
//! the real site router pointed at it. Requests go over TCP through a
//! cookie-keeping `reqwest` client, so sessions, redirects and middleware
//! behave as they do for a browser.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p spaceway-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `auth_flow` - Login, registration, logout, route guard, token expiry
//! - `site_pages` - Marketing pages, theme, legal pages, forms
//! - `calculator` - Calculator pages, CSV report and JSON API

use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::routing::{get, post};
use axum::{Json, Router};
use reqwest::{Client, Response, redirect::Policy};
use serde_json::{Value, json};
use spaceway_site::config::SiteConfig;
use spaceway_site::state::AppState;
use url::Url;

/// The password the stub backend accepts for every account.
pub const PASSWORD: &str = "correct-horse";

/// Tokens the stub has revoked; `/auth/me` answers 401 for them.
type Revoked = Arc<Mutex<HashSet<String>>>;

/// A running site plus its stub backend.
pub struct TestContext {
    pub client: Client,
    pub site_url: Url,
    revoked: Revoked,
}

impl TestContext {
    /// Start the stub backend and the site with default settings.
    ///
    /// Token validation is not cached by default, so revocations take effect
    /// on the next request.
    pub async fn new() -> Self {
        let revoked = Revoked::default();
        let api_url = spawn_backend(Arc::clone(&revoked)).await;

        let config = SiteConfig::local(api_url);

        let site_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../site");
        let state = AppState::new(config, &site_dir.join("content"))
            .expect("Failed to initialize application state");
        let app = spaceway_site::app(state, site_dir.join("static"));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind site listener");
        let addr = listener.local_addr().expect("Site listener has no address");
        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("Site server error");
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            site_url: Url::parse(&format!("http://{addr}")).expect("Invalid site URL"),
            revoked,
        }
    }

    /// Absolute URL for a site path.
    #[must_use]
    pub fn url(&self, path: &str) -> Url {
        self.site_url.join(path).expect("Invalid path")
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET failed")
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST failed")
    }

    /// Sign in as `email` with [`PASSWORD`].
    pub async fn login(&self, email: &str) -> Response {
        self.post_form("/login", &[("email", email), ("password", PASSWORD)])
            .await
    }

    /// Make the backend reject the token it issued for `email`.
    pub fn revoke(&self, email: &str) {
        self.revoked
            .lock()
            .expect("revocation list poisoned")
            .insert(token_for(email));
    }
}

/// `Location` header of a redirect.
#[must_use]
pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn token_for(email: &str) -> String {
    format!("tok-{email}")
}

fn user(email: &str) -> Value {
    json!({
        "_id": format!("user-{email}"),
        "firstName": "Priya",
        "lastName": "Sharma",
        "email": email,
    })
}

async fn spawn_backend(revoked: Revoked) -> Url {
    let app = Router::new()
        .route("/api/auth/login", post(backend_login))
        .route("/api/auth/register", post(backend_register))
        .route("/api/auth/me", get(backend_me))
        .with_state(revoked);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind backend listener");
    let addr = listener.local_addr().expect("Backend listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Backend server error");
    });

    Url::parse(&format!("http://{addr}/api")).expect("Invalid backend URL")
}

async fn backend_login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let email = body["email"].as_str().unwrap_or_default();
    if body["password"] == PASSWORD {
        (
            StatusCode::OK,
            Json(json!({ "token": token_for(email), "user": user(email) })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid email or password" })),
        )
    }
}

async fn backend_register(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let email = body["email"].as_str().unwrap_or_default();
    if email.starts_with("taken@") {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "User already exists" })),
        );
    }
    (
        StatusCode::CREATED,
        Json(json!({ "token": token_for(email), "user": user(email) })),
    )
}

async fn backend_me(
    State(revoked): State<Revoked>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default();

    let is_revoked = revoked
        .lock()
        .map(|set| set.contains(token))
        .unwrap_or(true);

    match token.strip_prefix("tok-") {
        Some(email) if !is_revoked => (StatusCode::OK, Json(json!({ "user": user(email) }))),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Token expired" })),
        ),
    }
}
